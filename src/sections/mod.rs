/// Section trait and the list of page sections.

pub mod admin;
pub mod farm;
pub mod home;
pub mod market;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::page::Page;

/// Trait that every page section implements.
pub trait Section {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent, page: &mut Page) -> bool;

    /// Advance animations by `delta_ticks` ticks. Only the active section ticks.
    fn tick(&mut self, _delta_ticks: u32, _page: &Page) {}

    /// Called when the section becomes the active one.
    fn on_enter(&mut self, _page: &mut Page) {}

    /// Render the section into the given area.
    fn render(&self, page: &Page, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}

/// Navigation target in the page header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Home,
    Market,
    Farm,
    Admin,
}

pub const ALL_SECTIONS: [SectionKind; 4] = [
    SectionKind::Home,
    SectionKind::Market,
    SectionKind::Farm,
    SectionKind::Admin,
];

impl SectionKind {
    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Home => "首頁",
            SectionKind::Market => "農產市集",
            SectionKind::Farm => "開心農場",
            SectionKind::Admin => "後台管理",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SectionKind::Home => SectionKind::Market,
            SectionKind::Market => SectionKind::Farm,
            SectionKind::Farm => SectionKind::Admin,
            SectionKind::Admin => SectionKind::Home,
        }
    }
}

/// A line in a section's history panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

pub const MAX_LOG: usize = 50;

/// Append to a bounded history, dropping the oldest entry past [`MAX_LOG`].
pub fn push_log(log: &mut Vec<LogEntry>, text: &str, is_important: bool) {
    log.push(LogEntry {
        text: text.to_string(),
        is_important,
    });
    if log.len() > MAX_LOG {
        log.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_every_section() {
        let mut kind = SectionKind::Home;
        let mut seen = Vec::new();
        for _ in 0..ALL_SECTIONS.len() {
            seen.push(kind);
            kind = kind.next();
        }
        assert_eq!(seen, ALL_SECTIONS);
        assert_eq!(kind, SectionKind::Home);
    }

    #[test]
    fn log_is_capped() {
        let mut log = Vec::new();
        for i in 0..60 {
            push_log(&mut log, &format!("line {i}"), false);
        }
        assert_eq!(log.len(), MAX_LOG);
        assert_eq!(log[0].text, "line 10");
        assert_eq!(log[MAX_LOG - 1].text, "line 59");
    }
}

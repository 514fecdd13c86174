//! Home page state: featured-product marquee, lightbox and theme picker.

use crate::sections::{push_log, LogEntry};

/// Characters the marquee advances per tick.
pub const MARQUEE_SPEED: u32 = 1;
/// Characters moved by one press of the scroll buttons.
pub const MANUAL_STEP: u32 = 12;
pub const ITEM_SEPARATOR: &str = "  ～  ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Marquee {
    /// Position into one copy of the strip, in characters.
    pub offset: u32,
    pub paused: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// Enlarged view of one featured product.
    Lightbox(u32),
    Themes,
}

pub struct HomeState {
    pub marquee: Marquee,
    pub overlay: Option<Overlay>,
    pub log: Vec<LogEntry>,
}

impl HomeState {
    pub fn new() -> Self {
        let mut state = Self {
            marquee: Marquee::default(),
            overlay: None,
            log: Vec::new(),
        };
        state.add_log("歡迎光臨田園直送！", false);
        state
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        push_log(&mut self.log, text, is_important);
    }
}

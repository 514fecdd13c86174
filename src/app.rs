//! Page shell: section navigation, input routing and the outer frame.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState, InputEvent};
use crate::page::Page;
use crate::sections::admin::AdminSection;
use crate::sections::farm::FarmSection;
use crate::sections::home::HomeSection;
use crate::sections::market::MarketSection;
use crate::sections::{Section, SectionKind, ALL_SECTIONS};
use crate::theme::palette_for;
use crate::widgets::TabBar;

/// Navigation tab ids. Kept above every section's own id range.
pub const NAV_BASE: u16 = 60_000;

pub struct App {
    pub active: SectionKind,
    pub home: HomeSection,
    pub market: MarketSection,
    pub farm: FarmSection,
    pub admin: AdminSection,
    pub page: Page,
}

impl App {
    pub fn new() -> Self {
        Self::with_page(Page::new())
    }

    pub fn with_page(page: Page) -> Self {
        let mut app = Self {
            active: SectionKind::Home,
            home: HomeSection::new(),
            market: MarketSection::new(),
            farm: FarmSection::new(),
            admin: AdminSection::new(),
            page,
        };
        app.navigate(SectionKind::Home);
        app
    }

    fn active_mut(&mut self) -> (&mut dyn Section, &mut Page) {
        let section: &mut dyn Section = match self.active {
            SectionKind::Home => &mut self.home,
            SectionKind::Market => &mut self.market,
            SectionKind::Farm => &mut self.farm,
            SectionKind::Admin => &mut self.admin,
        };
        (section, &mut self.page)
    }

    fn active_section(&self) -> &dyn Section {
        match self.active {
            SectionKind::Home => &self.home,
            SectionKind::Market => &self.market,
            SectionKind::Farm => &self.farm,
            SectionKind::Admin => &self.admin,
        }
    }

    pub fn navigate(&mut self, kind: SectionKind) {
        self.active = kind;
        let (section, page) = self.active_mut();
        section.on_enter(page);
    }

    /// Route one input event. Navigation is handled here; everything else
    /// goes to the active section.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Tab => {
                self.navigate(self.active.next());
                true
            }
            InputEvent::Click(id) if *id >= NAV_BASE => {
                match ALL_SECTIONS.get((id - NAV_BASE) as usize) {
                    Some(kind) => {
                        self.navigate(*kind);
                        true
                    }
                    None => false,
                }
            }
            _ => {
                let (section, page) = self.active_mut();
                section.handle_input(event, page)
            }
        }
    }

    /// Only the section on screen animates.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        let (section, page) = self.active_mut();
        section.tick(delta_ticks, page);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Navigation
                Constraint::Min(10),   // Section
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_nav(f, chunks[0], click_state);
        self.active_section().render(&self.page, f, chunks[1], click_state);
        self.render_footer(f, chunks[2]);
    }

    fn render_nav(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        let palette = palette_for(self.page.session.theme);
        let mut tabs = TabBar::new("│");
        for (i, kind) in ALL_SECTIONS.iter().enumerate() {
            let style = if *kind == self.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            tabs = tabs.tab(kind.name(), style, NAV_BASE + i as u16);
        }
        let borders = if is_narrow_layout(area.width) {
            Borders::TOP | Borders::BOTTOM
        } else {
            Borders::ALL
        };
        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(palette.border))
            .title(Span::styled(
                " 田園直送 ",
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ));
        let mut cs = click_state.borrow_mut();
        tabs.block(block).render(f, area, &mut cs);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let session = &self.page.session;
        let login = match &session.user {
            Some(name) => format!("登出({name})"),
            None => "未登入".to_string(),
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" 🎟 {} ", session.coupons.count()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(format!("· {login} "), Style::default().fg(Color::Gray)),
            Span::styled("· Tab 切換區塊", Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}

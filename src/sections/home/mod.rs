//! Landing page: a scrolling strip of featured products and the theme picker.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::page::Page;
use crate::sections::Section;
use crate::theme::ALL_THEMES;

use actions::*;
use state::{HomeState, Overlay};

/// Featured rows reachable with the digit keys.
pub const MAX_FEATURED: usize = 9;

pub struct HomeSection {
    pub state: HomeState,
}

impl HomeSection {
    pub fn new() -> Self {
        Self {
            state: HomeState::new(),
        }
    }

    fn pick_theme(&mut self, page: &mut Page, index: usize) -> bool {
        let Some(theme) = ALL_THEMES.get(index).copied() else {
            return false;
        };
        page.session.set_theme(page.store.as_mut(), theme);
        self.state
            .add_log(&format!("已切換背景主題：{}", theme.name()), false);
        self.state.overlay = None;
        true
    }

    fn open_featured(&mut self, page: &Page, index: usize) -> bool {
        match page.catalog.products().get(index) {
            Some(product) => {
                logic::open_lightbox(&mut self.state, product.id);
                true
            }
            None => false,
        }
    }

    fn handle_click(&mut self, action_id: u16, page: &mut Page) -> bool {
        let copy_len = logic::copy_len(&logic::build_strip(&page.catalog));
        match action_id {
            CLOSE_OVERLAY => logic::close_overlay(&mut self.state),
            id if self.state.overlay == Some(Overlay::Themes) => {
                return match id.checked_sub(THEME_BASE) {
                    Some(i) => self.pick_theme(page, i as usize),
                    None => false,
                };
            }
            _ if self.state.overlay.is_some() => return false,
            SCROLL_LEFT => logic::scroll_left(&mut self.state.marquee, copy_len),
            SCROLL_RIGHT => logic::scroll_right(&mut self.state.marquee, copy_len),
            TOGGLE_PAUSE => logic::toggle_pause(&mut self.state.marquee),
            OPEN_THEMES => self.state.overlay = Some(Overlay::Themes),
            id if id >= STRIP_PRODUCT_BASE => {
                let product_id = u32::from(id - STRIP_PRODUCT_BASE);
                if page.catalog.get(product_id).is_none() {
                    return false;
                }
                logic::open_lightbox(&mut self.state, product_id);
            }
            id if id >= FEATURED_BASE => {
                return self.open_featured(page, (id - FEATURED_BASE) as usize)
            }
            _ => return false,
        }
        true
    }

    fn handle_key(&mut self, key: char, page: &mut Page) -> bool {
        let digit = key
            .to_digit(10)
            .filter(|d| *d >= 1)
            .map(|d| d as u16 - 1);
        let id = match (self.state.overlay, key, digit) {
            (Some(Overlay::Themes), _, Some(i)) => THEME_BASE + i,
            (Some(_), 'x', _) => CLOSE_OVERLAY,
            (Some(_), _, _) => return false,
            (None, 'h', _) => SCROLL_LEFT,
            (None, 'l', _) => SCROLL_RIGHT,
            (None, 'p', _) => TOGGLE_PAUSE,
            (None, 't', _) => OPEN_THEMES,
            (None, _, Some(i)) if (i as usize) < MAX_FEATURED => FEATURED_BASE + i,
            _ => return false,
        };
        self.handle_click(id, page)
    }
}

impl Section for HomeSection {
    fn handle_input(&mut self, event: &InputEvent, page: &mut Page) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c, page),
            InputEvent::Click(id) => self.handle_click(*id, page),
            InputEvent::Esc | InputEvent::Enter if self.state.overlay.is_some() => {
                logic::close_overlay(&mut self.state);
                true
            }
            _ => false,
        }
    }

    fn tick(&mut self, delta_ticks: u32, page: &Page) {
        let copy_len = logic::copy_len(&logic::build_strip(&page.catalog));
        logic::tick(&mut self.state.marquee, delta_ticks, copy_len);
    }

    fn render(&self, page: &Page, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, page, f, area, click_state);
    }
}

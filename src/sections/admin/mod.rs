//! Admin panel: log in with the shop credential, then add or take down products.

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

use actions::*;
use logic::AdminError;
use state::{AdminState, Field, MAX_KEYED_ROWS};

pub struct AdminSection {
    pub state: AdminState,
}

impl AdminSection {
    pub fn new() -> Self {
        Self {
            state: AdminState::new(),
        }
    }

    fn fail(&mut self, page: &mut Page, err: AdminError) {
        let msg = err.to_string();
        self.state.add_log(&msg.replace('\n', " "), true);
        page.alert(&msg);
    }

    /// Field that typing goes to. The login form always has one.
    fn active_field(&self, page: &Page) -> Option<Field> {
        if page.session.is_logged_in() {
            self.state.focus.filter(|f| !f.is_login())
        } else {
            Some(self.state.focus.filter(|f| f.is_login()).unwrap_or(Field::Username))
        }
    }

    fn submit_login(&mut self, page: &mut Page) {
        let username = self.state.username.trim().to_string();
        match logic::check_credentials(&username, &self.state.password) {
            Ok(()) => {
                page.session.log_in(page.store.as_mut(), &username);
                self.state.clear_login();
                self.state.focus = None;
                let msg = format!("管理員 {username} 登入成功！");
                self.state.add_log(&msg, true);
                page.alert(&msg);
            }
            Err(e) => {
                self.state.password.clear();
                self.state.focus = Some(Field::Password);
                self.fail(page, e);
            }
        }
    }

    fn logout(&mut self, page: &mut Page) {
        if !page.confirm("確定要登出管理員帳號嗎？") {
            return;
        }
        page.session.log_out(page.store.as_mut());
        self.state.focus = Some(Field::Username);
        self.state.add_log("已登出", false);
        page.alert("已登出");
    }

    fn submit_product(&mut self, page: &mut Page) {
        match logic::validate_draft(&self.state.draft) {
            Ok(product) => {
                page.catalog.add(&product.name, product.price, product.category);
                self.state.add_log(
                    &format!("上架：{} NT$ {} ({})", product.name, product.price, product.category.name()),
                    false,
                );
                self.state.draft = Default::default();
                self.state.focus = None;
                page.alert("上架成功！");
            }
            Err(e) => self.fail(page, e),
        }
    }

    fn remove_product(&mut self, page: &mut Page, index: usize) -> bool {
        let Some(name) = page.catalog.products().get(index).map(|p| p.name.clone()) else {
            return false;
        };
        if !page.confirm("確定要下架此商品嗎？") {
            return true;
        }
        if page.catalog.remove_at(index).is_some() {
            self.state.add_log(&format!("已下架：{name}"), false);
            page.alert("商品已下架");
        }
        true
    }

    fn submit_field(&mut self, page: &mut Page, field: Field) {
        match field.next() {
            Some(next) => self.state.focus = Some(next),
            None if field.is_login() => self.submit_login(page),
            None => self.submit_product(page),
        }
    }

    fn handle_click(&mut self, action_id: u16, page: &mut Page) -> bool {
        if !page.session.is_logged_in() {
            match action_id {
                FOCUS_USERNAME => self.state.focus = Some(Field::Username),
                FOCUS_PASSWORD => self.state.focus = Some(Field::Password),
                SUBMIT_LOGIN => self.submit_login(page),
                _ => return false,
            }
            return true;
        }
        match action_id {
            LOGOUT => self.logout(page),
            FOCUS_NAME => self.state.focus = Some(Field::ProductName),
            FOCUS_PRICE => self.state.focus = Some(Field::ProductPrice),
            CYCLE_CATEGORY => {
                self.state.draft.category = logic::next_category(self.state.draft.category)
            }
            SUBMIT_PRODUCT => self.submit_product(page),
            id if id >= REMOVE_BASE => return self.remove_product(page, (id - REMOVE_BASE) as usize),
            _ => return false,
        }
        true
    }

    /// Shortcut keys while no field has focus.
    fn handle_key(&mut self, key: char, page: &mut Page) -> bool {
        let id = match key {
            'n' => FOCUS_NAME,
            'c' => CYCLE_CATEGORY,
            'a' => SUBMIT_PRODUCT,
            'o' => LOGOUT,
            '1'..='9' => {
                let i = key as u16 - '1' as u16;
                if i as usize >= MAX_KEYED_ROWS {
                    return false;
                }
                REMOVE_BASE + i
            }
            _ => return false,
        };
        self.handle_click(id, page)
    }
}

impl Section for AdminSection {
    fn handle_input(&mut self, event: &InputEvent, page: &mut Page) -> bool {
        if let InputEvent::Click(id) = event {
            return self.handle_click(*id, page);
        }
        match (self.active_field(page), event) {
            (Some(field), InputEvent::Key(c)) => logic::type_char(self.state.field_mut(field), *c),
            (Some(field), InputEvent::Backspace) => logic::backspace(self.state.field_mut(field)),
            (Some(field), InputEvent::Enter) => {
                self.submit_field(page, field);
                true
            }
            (Some(field), InputEvent::Esc) if !field.is_login() => {
                self.state.focus = None;
                true
            }
            (Some(_), InputEvent::Esc) => {
                self.state.clear_login();
                self.state.focus = Some(Field::Username);
                true
            }
            (None, InputEvent::Key(c)) => self.handle_key(*c, page),
            _ => false,
        }
    }

    fn on_enter(&mut self, page: &mut Page) {
        if !page.session.is_logged_in() && self.state.focus.is_none() {
            self.state.focus = Some(Field::Username);
        }
    }

    fn render(&self, page: &Page, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, self.active_field(page), page, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::prompt::ScriptedPrompt;
    use crate::storage::{KeyValueStore, MemoryStore, KEY_LOGGED_IN, KEY_USERNAME};

    fn setup(answers: &[bool]) -> (AdminSection, Page, ScriptedPrompt) {
        let prompt = ScriptedPrompt::answering(answers);
        let mut page = Page::for_test(MemoryStore::new(), prompt.clone());
        let mut admin = AdminSection::new();
        admin.on_enter(&mut page);
        (admin, page, prompt)
    }

    fn type_text(admin: &mut AdminSection, page: &mut Page, text: &str) {
        for c in text.chars() {
            admin.handle_input(&InputEvent::Key(c), page);
        }
    }

    fn log_in(admin: &mut AdminSection, page: &mut Page) {
        type_text(admin, page, "admin");
        admin.handle_input(&InputEvent::Enter, page);
        type_text(admin, page, "1234");
        admin.handle_input(&InputEvent::Enter, page);
    }

    #[test]
    fn login_persists_flag_and_name() {
        let (mut admin, mut page, prompt) = setup(&[]);
        log_in(&mut admin, &mut page);

        assert!(page.session.is_logged_in());
        assert_eq!(page.store.get(KEY_LOGGED_IN).as_deref(), Some("true"));
        assert_eq!(page.store.get(KEY_USERNAME).as_deref(), Some("admin"));
        assert_eq!(prompt.alerts(), ["管理員 admin 登入成功！"]);
        assert!(admin.state.password.is_empty());
    }

    #[test]
    fn wrong_password_alerts_hint() {
        let (mut admin, mut page, prompt) = setup(&[]);
        type_text(&mut admin, &mut page, "admin");
        admin.handle_input(&InputEvent::Enter, &mut page);
        type_text(&mut admin, &mut page, "0000");
        admin.handle_input(&InputEvent::Enter, &mut page);

        assert!(!page.session.is_logged_in());
        assert_eq!(page.store.get(KEY_LOGGED_IN), None);
        assert_eq!(prompt.alerts(), [AdminError::BadCredentials.to_string()]);
        assert_eq!(admin.state.focus, Some(Field::Password));
        assert_eq!(admin.state.username, "admin");
    }

    #[test]
    fn backspace_edits_focused_field() {
        let (mut admin, mut page, _) = setup(&[]);
        type_text(&mut admin, &mut page, "adminx");
        admin.handle_input(&InputEvent::Backspace, &mut page);
        assert_eq!(admin.state.username, "admin");
    }

    #[test]
    fn shortcuts_are_text_while_logged_out() {
        let (mut admin, mut page, _) = setup(&[]);
        type_text(&mut admin, &mut page, "o1");
        assert_eq!(admin.state.username, "o1");
        assert_eq!(page.catalog.len(), Catalog::seeded().len());
    }

    #[test]
    fn logout_needs_confirmation() {
        let (mut admin, mut page, prompt) = setup(&[false, true]);
        log_in(&mut admin, &mut page);

        admin.handle_input(&InputEvent::Key('o'), &mut page);
        assert!(page.session.is_logged_in());

        admin.handle_input(&InputEvent::Key('o'), &mut page);
        assert!(!page.session.is_logged_in());
        assert_eq!(page.store.get(KEY_USERNAME), None);
        assert_eq!(prompt.confirms(), ["確定要登出管理員帳號嗎？"; 2]);
        assert_eq!(prompt.alerts().last().map(String::as_str), Some("已登出"));
    }

    #[test]
    fn remove_confirmed_product() {
        let (mut admin, mut page, prompt) = setup(&[false, true]);
        log_in(&mut admin, &mut page);
        let before = page.catalog.len();
        let second = page.catalog.products()[1].name.clone();

        admin.handle_input(&InputEvent::Key('2'), &mut page);
        assert_eq!(page.catalog.len(), before);

        admin.handle_input(&InputEvent::Key('2'), &mut page);
        assert_eq!(page.catalog.len(), before - 1);
        assert!(page.catalog.products().iter().all(|p| p.name != second));
        assert_eq!(prompt.alerts().last().map(String::as_str), Some("商品已下架"));
    }

    #[test]
    fn add_product_through_form() {
        let (mut admin, mut page, prompt) = setup(&[]);
        log_in(&mut admin, &mut page);

        admin.handle_input(&InputEvent::Key('n'), &mut page);
        type_text(&mut admin, &mut page, "水蜜桃");
        admin.handle_input(&InputEvent::Enter, &mut page);
        type_text(&mut admin, &mut page, "450");
        admin.handle_input(&InputEvent::Click(CYCLE_CATEGORY), &mut page);
        admin.handle_input(&InputEvent::Enter, &mut page);

        let added = page.catalog.products().last().unwrap();
        assert_eq!(added.name, "水蜜桃");
        assert_eq!(added.price, 450);
        assert_eq!(added.category, Category::Fruit);
        assert!(added.is_new);
        assert_eq!(prompt.alerts().last().map(String::as_str), Some("上架成功！"));
        assert!(admin.state.draft.name.is_empty());
        assert_eq!(admin.state.focus, None);
    }

    #[test]
    fn invalid_price_keeps_draft() {
        let (mut admin, mut page, prompt) = setup(&[]);
        log_in(&mut admin, &mut page);
        let before = page.catalog.len();

        admin.handle_input(&InputEvent::Click(FOCUS_NAME), &mut page);
        type_text(&mut admin, &mut page, "梨");
        admin.handle_input(&InputEvent::Click(FOCUS_PRICE), &mut page);
        type_text(&mut admin, &mut page, "十元");
        admin.handle_input(&InputEvent::Click(SUBMIT_PRODUCT), &mut page);

        assert_eq!(page.catalog.len(), before);
        assert_eq!(admin.state.draft.name, "梨");
        assert_eq!(prompt.alerts().last(), Some(&AdminError::InvalidPrice.to_string()));
    }

    #[test]
    fn missing_field_is_reported() {
        let (mut admin, mut page, prompt) = setup(&[]);
        log_in(&mut admin, &mut page);
        admin.handle_input(&InputEvent::Key('a'), &mut page);
        assert_eq!(prompt.alerts().last(), Some(&AdminError::MissingField.to_string()));
    }

    #[test]
    fn panel_clicks_ignored_while_logged_out() {
        let (mut admin, mut page, _) = setup(&[true]);
        let before = page.catalog.len();
        assert!(!admin.handle_input(&InputEvent::Click(REMOVE_BASE), &mut page));
        assert_eq!(page.catalog.len(), before);
    }
}

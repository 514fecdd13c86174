//! Farm-direct market: browse, add to cart, check out with coupons.

pub mod actions;
pub mod cart;
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
use state::{filters, MarketState, Screen, MAX_KEYED_ROWS};

pub struct MarketSection {
    pub state: MarketState,
}

impl MarketSection {
    pub fn new() -> Self {
        Self {
            state: MarketState::new(),
        }
    }

    fn checkout(&mut self, page: &mut Page) {
        let result = cart::checkout(
            &mut self.state.cart,
            self.state.coupon_toggle,
            &mut page.session.coupons,
            page.prompt.as_mut(),
        );
        match result {
            Ok(receipt) => {
                page.persist_coupons();
                self.state.coupon_toggle = false;
                self.state.screen = Screen::Catalog;
                logic::sync_coupon_toggle(&mut self.state, page.session.coupons);
                self.state.add_log(
                    &format!("結帳完成，實付 NT$ {}", receipt.total),
                    true,
                );
                page.alert(&receipt.summary());
            }
            Err(e) => {
                let msg = e.to_string();
                self.state.add_log(&msg, false);
                page.alert(&msg);
            }
        }
    }

    fn select_filter(&mut self, index: usize) -> bool {
        match filters().get(index) {
            Some(f) => {
                self.state.filter = *f;
                true
            }
            None => false,
        }
    }

    fn open_product(&mut self, page: &Page, index: usize) -> bool {
        logic::open_purchase(&mut self.state, &page.catalog, index)
    }

    fn confirm_add(&mut self, page: &Page) {
        let quantity = match self.state.screen {
            Screen::Purchase(d) => d.quantity,
            _ => return,
        };
        match logic::confirm_purchase(&mut self.state, &page.catalog, page.session.coupons) {
            Some(name) => self
                .state
                .add_log(&format!("已加入購物車：{name} x{quantity}"), false),
            None => self.state.add_log("此商品已下架。", false),
        }
    }

    fn remove_line(&mut self, page: &Page, index: usize) -> bool {
        match logic::remove_line(&mut self.state, index, page.session.coupons) {
            Some(name) => {
                self.state.add_log(&format!("已移除：{name}"), false);
                true
            }
            None => false,
        }
    }

    fn handle_click(&mut self, action_id: u16, page: &mut Page) -> bool {
        match self.state.screen {
            Screen::Purchase(_) => match action_id {
                QTY_LESS => logic::adjust_quantity(&mut self.state, false),
                QTY_MORE => logic::adjust_quantity(&mut self.state, true),
                TOGGLE_SHIPPING => logic::toggle_shipping(&mut self.state),
                CONFIRM_ADD => self.confirm_add(page),
                CLOSE_MODAL => self.state.screen = Screen::Catalog,
                _ => return false,
            },
            Screen::Cart => match action_id {
                TOGGLE_COUPON => {
                    if !logic::toggle_coupon(&mut self.state, page.session.coupons) {
                        self.state.add_log("未達低消 NT$ 300 或沒有抵用券。", false);
                    }
                }
                CHECKOUT => self.checkout(page),
                BACK_TO_CATALOG => self.state.screen = Screen::Catalog,
                id if id >= REMOVE_LINE_BASE => {
                    return self.remove_line(page, (id - REMOVE_LINE_BASE) as usize)
                }
                _ => return false,
            },
            Screen::Catalog => match action_id {
                OPEN_CART => {
                    logic::sync_coupon_toggle(&mut self.state, page.session.coupons);
                    self.state.screen = Screen::Cart;
                }
                CYCLE_FILTER => logic::cycle_filter(&mut self.state),
                id if id >= PRODUCT_BASE => return self.open_product(page, (id - PRODUCT_BASE) as usize),
                id if id >= FILTER_BASE => return self.select_filter((id - FILTER_BASE) as usize),
                _ => return false,
            },
        }
        true
    }

    fn handle_key(&mut self, key: char, page: &mut Page) -> bool {
        let row = match key {
            '1'..='9' => Some(key as usize - '1' as usize),
            '0' => Some(MAX_KEYED_ROWS - 1),
            _ => None,
        };
        let id = match (self.state.screen, key, row) {
            (Screen::Catalog, 'c', _) => OPEN_CART,
            (Screen::Catalog, 'f', _) => CYCLE_FILTER,
            (Screen::Catalog, _, Some(i)) => PRODUCT_BASE + i as u16,
            (Screen::Purchase(_), '-', _) => QTY_LESS,
            (Screen::Purchase(_), '+' | '=', _) => QTY_MORE,
            (Screen::Purchase(_), 's', _) => TOGGLE_SHIPPING,
            (Screen::Purchase(_), 'a', _) => CONFIRM_ADD,
            (Screen::Purchase(_), 'x', _) => CLOSE_MODAL,
            (Screen::Cart, 'u', _) => TOGGLE_COUPON,
            (Screen::Cart, 'b', _) => CHECKOUT,
            (Screen::Cart, 'x', _) => BACK_TO_CATALOG,
            (Screen::Cart, _, Some(i)) => REMOVE_LINE_BASE + i as u16,
            _ => return false,
        };
        self.handle_click(id, page)
    }
}

impl Section for MarketSection {
    fn handle_input(&mut self, event: &InputEvent, page: &mut Page) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c, page),
            InputEvent::Click(id) => self.handle_click(*id, page),
            InputEvent::Enter => match self.state.screen {
                Screen::Purchase(_) => self.handle_click(CONFIRM_ADD, page),
                Screen::Cart => self.handle_click(CHECKOUT, page),
                Screen::Catalog => false,
            },
            InputEvent::Esc if self.state.screen != Screen::Catalog => {
                self.state.screen = Screen::Catalog;
                true
            }
            _ => false,
        }
    }

    /// Coupons may have been earned on the farm since the last visit.
    fn on_enter(&mut self, page: &mut Page) {
        logic::sync_coupon_toggle(&mut self.state, page.session.coupons);
    }

    fn render(&self, page: &Page, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, page, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use crate::storage::{KeyValueStore, MemoryStore, KEY_COUPONS};

    fn setup(store: MemoryStore, answers: &[bool]) -> (MarketSection, Page, ScriptedPrompt) {
        let prompt = ScriptedPrompt::answering(answers);
        let mut page = Page::for_test(store, prompt.clone());
        let mut market = MarketSection::new();
        market.on_enter(&mut page);
        (market, page, prompt)
    }

    fn press(market: &mut MarketSection, page: &mut Page, keys: &str) {
        for c in keys.chars() {
            market.handle_input(&InputEvent::Key(c), page);
        }
    }

    /// Put enough of the first product in the cart to reach `target`.
    fn fill_cart(market: &mut MarketSection, page: &mut Page, target: u32) {
        let price = page.catalog.products()[0].price;
        press(market, page, "1");
        for _ in 1..target.div_ceil(price) {
            press(market, page, "+");
        }
        market.handle_input(&InputEvent::Enter, page);
    }

    #[test]
    fn keys_drive_purchase_modal() {
        let (mut market, mut page, _) = setup(MemoryStore::new(), &[]);
        press(&mut market, &mut page, "1++s");
        assert!(matches!(market.state.screen, Screen::Purchase(d) if d.quantity == 3));
        press(&mut market, &mut page, "a");
        assert_eq!(market.state.screen, Screen::Catalog);
        assert_eq!(market.state.cart.item_count(), 3);
        assert_eq!(market.state.cart.lines()[0].shipping, cart::Shipping::StorePickup);
    }

    #[test]
    fn esc_closes_modal_without_adding() {
        let (mut market, mut page, _) = setup(MemoryStore::new(), &[]);
        press(&mut market, &mut page, "1");
        market.handle_input(&InputEvent::Esc, &mut page);
        assert_eq!(market.state.screen, Screen::Catalog);
        assert!(market.state.cart.is_empty());
    }

    #[test]
    fn empty_checkout_alerts() {
        let (mut market, mut page, prompt) = setup(MemoryStore::with(&[(KEY_COUPONS, "2")]), &[]);
        press(&mut market, &mut page, "cb");
        assert_eq!(prompt.alerts(), ["購物車是空的，無法結帳！"]);
        assert_eq!(page.session.coupons.count(), 2);
    }

    #[test]
    fn checkout_with_coupon_persists_balance() {
        let (mut market, mut page, prompt) = setup(MemoryStore::with(&[(KEY_COUPONS, "2")]), &[]);
        fill_cart(&mut market, &mut page, 300);
        press(&mut market, &mut page, "cu");
        assert!(market.state.coupon_toggle);
        market.handle_input(&InputEvent::Enter, &mut page);

        assert!(market.state.cart.is_empty());
        assert!(!market.state.coupon_toggle);
        assert_eq!(page.session.coupons.count(), 1);
        assert_eq!(page.store.get(KEY_COUPONS).as_deref(), Some("1"));
        assert!(prompt.confirms().is_empty());
        assert!(prompt.alerts()[0].contains("折扣: NT$ 100"));
    }

    #[test]
    fn forgotten_coupon_is_offered() {
        let (mut market, mut page, prompt) = setup(MemoryStore::with(&[(KEY_COUPONS, "1")]), &[true]);
        fill_cart(&mut market, &mut page, 300);
        press(&mut market, &mut page, "cb");
        assert_eq!(prompt.confirms().len(), 1);
        assert_eq!(page.session.coupons.count(), 0);
        assert_eq!(page.store.get(KEY_COUPONS).as_deref(), Some("0"));
    }

    #[test]
    fn toggle_refused_below_minimum() {
        let (mut market, mut page, _) = setup(MemoryStore::with(&[(KEY_COUPONS, "1")]), &[]);
        press(&mut market, &mut page, "1a");
        assert!(market.state.cart.subtotal() < 300);
        press(&mut market, &mut page, "cu");
        assert!(!market.state.coupon_toggle);
    }

    #[test]
    fn removing_a_line_resyncs_toggle() {
        let (mut market, mut page, _) = setup(MemoryStore::with(&[(KEY_COUPONS, "1")]), &[]);
        fill_cart(&mut market, &mut page, 300);
        press(&mut market, &mut page, "cu");
        assert!(market.state.coupon_toggle);
        press(&mut market, &mut page, "1");
        assert!(market.state.cart.is_empty());
        assert!(!market.state.coupon_toggle);
        assert!(!market.state.coupon_enabled);
    }

    #[test]
    fn on_enter_picks_up_new_coupons() {
        let (mut market, mut page, _) = setup(MemoryStore::new(), &[]);
        fill_cart(&mut market, &mut page, 300);
        market.on_enter(&mut page);
        assert!(!market.state.coupon_enabled);

        page.award_coupon();
        market.on_enter(&mut page);
        assert!(market.state.coupon_enabled);
    }

    #[test]
    fn filter_click_selects_tab() {
        let (mut market, mut page, _) = setup(MemoryStore::new(), &[]);
        assert!(market.handle_input(&InputEvent::Click(FILTER_BASE + 2), &mut page));
        assert_eq!(market.state.filter, filters()[2]);
        assert!(!market.handle_input(&InputEvent::Click(FILTER_BASE + 40), &mut page));
    }
}

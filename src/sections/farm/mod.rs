//! Happy Farm: a ten-day crop mini-game. Finishing a run earns a market coupon.

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
use crate::sections::{push_log, LogEntry, Section};

use actions::*;
use logic::{DayStart, FarmError, FinalReport, PrimaryOutcome};
use state::{Disaster, FarmItem, FarmPhase, FarmState, Overlay, ShopOrder};

pub const COUPON_GIFT_MESSAGE: &str = "感謝你的遊玩贈與你100元抵用券一張";

pub struct FarmSection {
    pub state: FarmState,
    pub overlay: Option<Overlay>,
    pub order: ShopOrder,
    pub log: Vec<LogEntry>,
    /// Result of the last finished run, shown until restart.
    pub report: Option<FinalReport>,
}

impl FarmSection {
    pub fn new() -> Self {
        let mut section = Self {
            state: FarmState::default(),
            overlay: None,
            order: ShopOrder::default(),
            log: Vec::new(),
            report: None,
        };
        section.add_log("第 1 天：一片空地，等待播種。", false);
        section
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        push_log(&mut self.log, text, is_important);
    }

    fn fail(&mut self, page: &mut Page, err: FarmError) {
        let msg = err.to_string();
        self.add_log(&msg, false);
        page.alert(&msg);
    }

    fn primary(&mut self, page: &mut Page) {
        match logic::primary_action(&mut self.state) {
            Ok(PrimaryOutcome::Harvested { reward, market_boom }) => {
                if market_boom {
                    self.add_log("市場行情大好！農產品價格飆升！", true);
                }
                self.add_log(&format!("大豐收！獲得 ${reward}"), true);
            }
            Ok(PrimaryOutcome::Grew { progress }) => {
                self.add_log(&format!("澆水照料，生長進度 {progress}%"), false);
            }
            Err(e) => self.fail(page, e),
        }
    }

    fn force_harvest(&mut self, page: &mut Page) {
        if !self.state.can_force_harvest() {
            self.fail(page, FarmError::NoTyphoon);
            return;
        }
        if !page.confirm("確定要強制收成嗎？收益將減半 ($500)，且生長進度歸零。") {
            return;
        }
        match logic::force_harvest(&mut self.state) {
            Ok(reward) => self.add_log(&format!("已強制收成！獲得 ${reward}。"), true),
            Err(e) => self.fail(page, e),
        }
    }

    fn refill(&mut self, page: &mut Page) {
        match logic::refill_water(&mut self.state) {
            Ok(()) => self.add_log("水分已補滿！", false),
            Err(e) => self.fail(page, e),
        }
    }

    fn buy(&mut self, page: &mut Page, item: FarmItem) {
        let quantity = self.order.quantity(item);
        match logic::buy_item(&mut self.state, item, item.price(), quantity) {
            Ok(cost) => self.add_log(
                &format!("購買成功！ {quantity} 個 {} (花費 ${cost})", item.name()),
                false,
            ),
            Err(e) => self.fail(page, e),
        }
    }

    fn use_item(&mut self, page: &mut Page, item: FarmItem) {
        match logic::use_item(&mut self.state, item) {
            Ok(()) => {
                let msg = match item {
                    FarmItem::Fertilizer => format!(
                        "使用了肥料！作物生長加速 (+5)。今日已用: {}/{}",
                        self.state.daily_fertilizer_use,
                        state::FERTILIZER_DAILY_CAP
                    ),
                    FarmItem::Pesticide => "使用了除蟲劑！作物獲得保護，可抵禦蟲害。".to_string(),
                };
                self.add_log(&msg, false);
            }
            Err(e) => self.fail(page, e),
        }
    }

    fn end_turn(&mut self, page: &mut Page) {
        match logic::end_turn(&mut self.state, &mut page.rng) {
            Ok(end) => {
                if let Some(damage) = end.damage {
                    self.add_log(damage.report(), true);
                    page.alert(damage.report());
                }
                self.add_log(&format!("第 {} 天結束。預兆：{}", self.state.day, end.forecast.omen()), false);
            }
            Err(e) => self.fail(page, e),
        }
    }

    fn confirm_forecast(&mut self, page: &mut Page) {
        match logic::confirm_forecast(&mut self.state) {
            Ok(DayStart::NewDay { day, disaster }) => {
                match disaster {
                    Some(Disaster::Typhoon) => {
                        page.alert("注意！颱風警報生效中！您可以選擇「強制收成」以減少損失。")
                    }
                    Some(Disaster::Pest) => page.alert("注意！蟲災爆發！請務必使用除蟲劑！"),
                    _ => {}
                }
                let msg = format!("第 {day} 天開始了！");
                self.add_log(&msg, true);
                page.alert(&msg);
            }
            Ok(DayStart::GameOver(report)) => {
                page.award_coupon();
                self.report = Some(report);
                self.overlay = None;
                self.add_log(
                    &format!("遊戲結束！最終資金 ${}，評價 {}", report.money, report.rank.letter()),
                    true,
                );
                self.add_log(COUPON_GIFT_MESSAGE, true);
            }
            Err(e) => self.fail(page, e),
        }
    }

    fn restart(&mut self) {
        logic::reset(&mut self.state);
        self.report = None;
        self.overlay = None;
        self.order = ShopOrder::default();
        self.add_log("新的挑戰開始了！ (第 1 天)", true);
    }

    fn handle_click(&mut self, action_id: u16, page: &mut Page) -> bool {
        match action_id {
            OPEN_TUTORIAL => self.overlay = Some(Overlay::Tutorial),
            CLOSE_OVERLAY => self.overlay = None,
            FERTILIZER_LESS => self.order.adjust(FarmItem::Fertilizer, false),
            FERTILIZER_MORE => self.order.adjust(FarmItem::Fertilizer, true),
            PESTICIDE_LESS => self.order.adjust(FarmItem::Pesticide, false),
            PESTICIDE_MORE => self.order.adjust(FarmItem::Pesticide, true),
            BUY_FERTILIZER => self.buy(page, FarmItem::Fertilizer),
            BUY_PESTICIDE => self.buy(page, FarmItem::Pesticide),
            CONFIRM_FORECAST => self.confirm_forecast(page),
            RESTART => self.restart(),
            PRIMARY_ACTION => self.primary(page),
            FORCE_HARVEST => self.force_harvest(page),
            REFILL_WATER => self.refill(page),
            USE_FERTILIZER => self.use_item(page, FarmItem::Fertilizer),
            USE_PESTICIDE => self.use_item(page, FarmItem::Pesticide),
            OPEN_SHOP => self.overlay = Some(Overlay::Shop),
            END_TURN => self.end_turn(page),
            _ => return false,
        }
        true
    }

    fn handle_key(&mut self, key: char, page: &mut Page) -> bool {
        match self.overlay {
            Some(Overlay::Tutorial) => {
                self.overlay = None;
                return true;
            }
            Some(Overlay::Shop) => {
                let id = match key {
                    '1' => FERTILIZER_LESS,
                    '2' => FERTILIZER_MORE,
                    '3' => BUY_FERTILIZER,
                    '4' => PESTICIDE_LESS,
                    '5' => PESTICIDE_MORE,
                    '6' => BUY_PESTICIDE,
                    'x' => CLOSE_OVERLAY,
                    _ => return false,
                };
                return self.handle_click(id, page);
            }
            None => {}
        }

        let id = match (self.state.phase, key) {
            (_, '?') => OPEN_TUTORIAL,
            (FarmPhase::GameOver, 'r') => RESTART,
            (FarmPhase::Playing, '1') => PRIMARY_ACTION,
            (FarmPhase::Playing, '2') => FORCE_HARVEST,
            (FarmPhase::Playing, '3') => REFILL_WATER,
            (FarmPhase::Playing, '4') => USE_FERTILIZER,
            (FarmPhase::Playing, '5') => USE_PESTICIDE,
            (FarmPhase::Playing, '6') => OPEN_SHOP,
            (FarmPhase::Playing, '0') => END_TURN,
            _ => return false,
        };
        self.handle_click(id, page)
    }
}

impl Section for FarmSection {
    fn handle_input(&mut self, event: &InputEvent, page: &mut Page) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c, page),
            InputEvent::Click(id) => self.handle_click(*id, page),
            InputEvent::Enter if self.overlay.is_none() && self.state.phase == FarmPhase::Forecast => {
                self.confirm_forecast(page);
                true
            }
            InputEvent::Esc if self.overlay.is_some() => {
                self.overlay = None;
                true
            }
            _ => false,
        }
    }

    fn render(&self, page: &Page, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, page, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use crate::storage::{KeyValueStore, MemoryStore, KEY_COUPONS};

    fn setup(answers: &[bool]) -> (FarmSection, Page, ScriptedPrompt) {
        let prompt = ScriptedPrompt::answering(answers);
        let page = Page::for_test(MemoryStore::new(), prompt.clone());
        (FarmSection::new(), page, prompt)
    }

    fn key(section: &mut FarmSection, page: &mut Page, c: char) -> bool {
        section.handle_input(&InputEvent::Key(c), page)
    }

    #[test]
    fn grow_via_key() {
        let (mut farm, mut page, _) = setup(&[]);
        assert!(key(&mut farm, &mut page, '1'));
        assert_eq!(farm.state.progress, 34);
        assert_eq!(farm.state.water, 80);
    }

    #[test]
    fn errors_are_logged_and_alerted() {
        let (mut farm, mut page, prompt) = setup(&[]);
        key(&mut farm, &mut page, '3');
        assert_eq!(prompt.alerts(), ["水分已滿，無需補水！"]);
        assert_eq!(farm.log.last().map(|e| e.text.as_str()), Some("水分已滿，無需補水！"));
    }

    #[test]
    fn force_harvest_asks_first() {
        let (mut farm, mut page, prompt) = setup(&[false, true]);
        farm.state.active_disaster = Some(Disaster::Typhoon);
        farm.state.progress = 68;

        key(&mut farm, &mut page, '2');
        assert_eq!(farm.state.progress, 68);
        assert_eq!(prompt.confirms().len(), 1);

        key(&mut farm, &mut page, '2');
        assert_eq!(farm.state.progress, 0);
        assert_eq!(farm.state.money, 1500);
        assert_eq!(farm.state.active_disaster, None);
    }

    #[test]
    fn force_harvest_without_typhoon_never_prompts() {
        let (mut farm, mut page, prompt) = setup(&[true]);
        key(&mut farm, &mut page, '2');
        assert!(prompt.confirms().is_empty());
        assert_eq!(farm.state.money, 1000);
    }

    #[test]
    fn shop_overlay_buys_with_chosen_quantity() {
        let (mut farm, mut page, _) = setup(&[]);
        key(&mut farm, &mut page, '6');
        assert_eq!(farm.overlay, Some(Overlay::Shop));
        key(&mut farm, &mut page, '5');
        key(&mut farm, &mut page, '6');
        assert_eq!(farm.state.inventory.pesticide, 2);
        assert_eq!(farm.state.money, 600);

        // Field keys are inert while the shop is open.
        key(&mut farm, &mut page, '1');
        assert_eq!(farm.state.progress, 0);

        farm.handle_input(&InputEvent::Esc, &mut page);
        assert_eq!(farm.overlay, None);
    }

    #[test]
    fn tutorial_closes_on_any_key() {
        let (mut farm, mut page, _) = setup(&[]);
        key(&mut farm, &mut page, '?');
        assert_eq!(farm.overlay, Some(Overlay::Tutorial));
        key(&mut farm, &mut page, '1');
        assert_eq!(farm.overlay, None);
        assert_eq!(farm.state.progress, 0);
    }

    #[test]
    fn end_turn_then_enter_starts_next_day() {
        let (mut farm, mut page, prompt) = setup(&[]);
        key(&mut farm, &mut page, '0');
        assert_eq!(farm.state.phase, FarmPhase::Forecast);
        // Field actions wait for the forecast.
        assert!(!key(&mut farm, &mut page, '1'));

        farm.handle_input(&InputEvent::Enter, &mut page);
        assert_eq!(farm.state.day, 2);
        assert_eq!(farm.state.phase, FarmPhase::Playing);
        assert_eq!(prompt.alerts().last().map(String::as_str), Some("第 2 天開始了！"));
    }

    #[test]
    fn typhoon_damage_is_reported() {
        let (mut farm, mut page, prompt) = setup(&[]);
        farm.state.active_disaster = Some(Disaster::Typhoon);
        farm.state.progress = 50;
        key(&mut farm, &mut page, '0');
        assert_eq!(farm.state.progress, 0);
        assert_eq!(prompt.alerts(), ["颱風過境！田地一片狼藉 (進度歸零)。"]);
    }

    #[test]
    fn empty_field_typhoon_reports_nothing() {
        let (mut farm, mut page, prompt) = setup(&[]);
        farm.state.active_disaster = Some(Disaster::Typhoon);
        key(&mut farm, &mut page, '0');
        assert!(prompt.alerts().is_empty());
    }

    #[test]
    fn ten_days_award_exactly_one_persisted_coupon() {
        let (mut farm, mut page, _) = setup(&[]);
        farm.state.money = 0;
        for _ in 0..10 {
            key(&mut farm, &mut page, '0');
            farm.handle_input(&InputEvent::Enter, &mut page);
        }
        assert_eq!(farm.state.phase, FarmPhase::GameOver);
        assert_eq!(page.session.coupons.count(), 1);
        assert_eq!(page.store.get(KEY_COUPONS).as_deref(), Some("1"));
        assert!(farm.report.is_some());

        // Further input cannot award again.
        farm.handle_input(&InputEvent::Enter, &mut page);
        key(&mut farm, &mut page, '0');
        assert_eq!(page.session.coupons.count(), 1);
        assert_eq!(farm.log.iter().filter(|e| e.text == COUPON_GIFT_MESSAGE).count(), 1);
    }

    #[test]
    fn restart_keeps_coupons() {
        let (mut farm, mut page, _) = setup(&[]);
        farm.state.day = 10;
        key(&mut farm, &mut page, '0');
        farm.handle_input(&InputEvent::Enter, &mut page);
        assert_eq!(farm.state.phase, FarmPhase::GameOver);

        assert!(key(&mut farm, &mut page, 'r'));
        assert_eq!(farm.state, FarmState::default());
        assert!(farm.report.is_none());
        assert_eq!(page.session.coupons.count(), 1);
    }

    #[test]
    fn click_ids_dispatch() {
        let (mut farm, mut page, _) = setup(&[]);
        farm.state.water = 40;
        assert!(farm.handle_input(&InputEvent::Click(REFILL_WATER), &mut page));
        assert_eq!(farm.state.water, 100);
        assert!(!farm.handle_input(&InputEvent::Click(999), &mut page));
    }
}

//! Farm mini-game state and balance constants.

pub const LAST_DAY: u32 = 10;
pub const STARTING_MONEY: u32 = 1000;
pub const MAX_STAMINA: u32 = 3;
pub const MAX_PROGRESS: u32 = 100;
pub const MAX_WATER: u32 = 100;

pub const GROW_WATER_COST: u32 = 20;
pub const GROW_PROGRESS: u32 = 34;
pub const HARVEST_REWARD: u32 = 1000;
pub const MARKET_HARVEST_REWARD: u32 = 1500;
pub const FORCE_HARVEST_REWARD: u32 = 500;
pub const WATER_REFILL_COST: u32 = 500;

pub const FERTILIZER_PROGRESS: u32 = 5;
pub const FERTILIZER_DAILY_CAP: u32 = 5;
pub const FERTILIZER_PRICE: u32 = 100;
pub const PESTICIDE_PRICE: u32 = 200;

/// Day-level event forecast the evening before it strikes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disaster {
    Typhoon,
    Pest,
    /// Favorable: harvests that day sell for more.
    Market,
}

pub const ALL_DISASTERS: [Disaster; 3] = [Disaster::Typhoon, Disaster::Pest, Disaster::Market];

impl Disaster {
    pub fn name(self) -> &'static str {
        match self {
            Disaster::Typhoon => "颱風",
            Disaster::Pest => "蟲害",
            Disaster::Market => "市場波動",
        }
    }

    /// Omen shown on the forecast screen.
    pub fn omen(self) -> &'static str {
        match self {
            Disaster::Typhoon => "氣象預報顯示，近期可能有強烈颱風接近...",
            Disaster::Pest => "在田間發現了蟲卵，似乎是蟲災的前兆...",
            Disaster::Market => "市場消息指出，近期農產品價格將大幅波動...",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FarmItem {
    Fertilizer,
    Pesticide,
}

impl FarmItem {
    pub fn name(self) -> &'static str {
        match self {
            FarmItem::Fertilizer => "肥料",
            FarmItem::Pesticide => "除蟲劑",
        }
    }

    pub fn price(self) -> u32 {
        match self {
            FarmItem::Fertilizer => FERTILIZER_PRICE,
            FarmItem::Pesticide => PESTICIDE_PRICE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub fertilizer: u32,
    pub pesticide: u32,
}

impl Inventory {
    pub fn count(&self, item: FarmItem) -> u32 {
        match item {
            FarmItem::Fertilizer => self.fertilizer,
            FarmItem::Pesticide => self.pesticide,
        }
    }

    pub fn slot_mut(&mut self, item: FarmItem) -> &mut u32 {
        match item {
            FarmItem::Fertilizer => &mut self.fertilizer,
            FarmItem::Pesticide => &mut self.pesticide,
        }
    }
}

/// Where the day cycle stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FarmPhase {
    /// Actions are open for the current day.
    Playing,
    /// The day has ended and tomorrow's forecast is waiting to be acknowledged.
    Forecast,
    /// The run is over; only reset is possible.
    GameOver,
}

/// Final grade from the money held at the end of the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rank {
    S,
    A,
    B,
    C,
}

impl Rank {
    pub fn from_money(money: u32) -> Self {
        match money {
            5000.. => Rank::S,
            3000.. => Rank::A,
            1500.. => Rank::B,
            _ => Rank::C,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Rank::S => "S",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
        }
    }

    pub fn comment(self) -> &'static str {
        match self {
            Rank::S => "傳說級農夫！太神啦！",
            Rank::A => "專業農夫！收益驚人！",
            Rank::B => "合格農夫，表現不錯！",
            Rank::C => "再接再厲...",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FarmState {
    pub day: u32,
    pub money: u32,
    pub stamina: u32,
    pub progress: u32,
    pub water: u32,
    pub inventory: Inventory,
    pub is_protected: bool,
    pub daily_fertilizer_use: u32,
    pub active_disaster: Option<Disaster>,
    pub next_disaster: Option<Disaster>,
    pub phase: FarmPhase,
}

impl Default for FarmState {
    fn default() -> Self {
        Self {
            day: 1,
            money: STARTING_MONEY,
            stamina: MAX_STAMINA,
            progress: 0,
            water: MAX_WATER,
            inventory: Inventory::default(),
            is_protected: false,
            daily_fertilizer_use: 0,
            active_disaster: None,
            next_disaster: None,
            phase: FarmPhase::Playing,
        }
    }
}

impl FarmState {
    pub fn is_harvest_ready(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }

    /// Force harvest is only offered while a typhoon is overhead.
    pub fn can_force_harvest(&self) -> bool {
        self.phase == FarmPhase::Playing && self.active_disaster == Some(Disaster::Typhoon)
    }
}

/// Panels drawn over the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Shop,
    Tutorial,
}

/// Quantities typed into the shop, one per item. Never below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShopOrder {
    pub fertilizer: u32,
    pub pesticide: u32,
}

impl Default for ShopOrder {
    fn default() -> Self {
        Self {
            fertilizer: 1,
            pesticide: 1,
        }
    }
}

impl ShopOrder {
    pub fn quantity(&self, item: FarmItem) -> u32 {
        match item {
            FarmItem::Fertilizer => self.fertilizer,
            FarmItem::Pesticide => self.pesticide,
        }
    }

    pub fn adjust(&mut self, item: FarmItem, more: bool) {
        let q = match item {
            FarmItem::Fertilizer => &mut self.fertilizer,
            FarmItem::Pesticide => &mut self.pesticide,
        };
        *q = if more { q.saturating_add(1) } else { q.saturating_sub(1).max(1) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_run() {
        let s = FarmState::default();
        assert_eq!((s.day, s.money, s.stamina, s.progress, s.water), (1, 1000, 3, 0, 100));
        assert_eq!(s.inventory, Inventory { fertilizer: 0, pesticide: 0 });
        assert!(!s.is_protected);
        assert_eq!(s.daily_fertilizer_use, 0);
        assert_eq!(s.active_disaster, None);
        assert_eq!(s.next_disaster, None);
        assert_eq!(s.phase, FarmPhase::Playing);
    }

    #[test]
    fn rank_thresholds() {
        assert_eq!(Rank::from_money(5200), Rank::S);
        assert_eq!(Rank::from_money(5000), Rank::S);
        assert_eq!(Rank::from_money(4999), Rank::A);
        assert_eq!(Rank::from_money(3000), Rank::A);
        assert_eq!(Rank::from_money(1500), Rank::B);
        assert_eq!(Rank::from_money(1499), Rank::C);
        assert_eq!(Rank::from_money(0), Rank::C);
    }

    #[test]
    fn inventory_slots_address_named_fields() {
        let mut inv = Inventory::default();
        *inv.slot_mut(FarmItem::Pesticide) += 2;
        assert_eq!(inv.pesticide, 2);
        assert_eq!(inv.count(FarmItem::Fertilizer), 0);
    }

    #[test]
    fn force_harvest_only_under_typhoon() {
        let mut s = FarmState::default();
        assert!(!s.can_force_harvest());
        s.active_disaster = Some(Disaster::Typhoon);
        assert!(s.can_force_harvest());
        s.active_disaster = Some(Disaster::Pest);
        assert!(!s.can_force_harvest());
    }

    #[test]
    fn shop_quantity_never_below_one() {
        let mut order = ShopOrder::default();
        order.adjust(FarmItem::Fertilizer, false);
        assert_eq!(order.fertilizer, 1);
        order.adjust(FarmItem::Pesticide, true);
        order.adjust(FarmItem::Pesticide, true);
        assert_eq!(order.quantity(FarmItem::Pesticide), 3);
    }
}

//! Market page state: catalog filter, purchase modal and cart view.

use crate::catalog::{Category, Filter, ALL_CATEGORIES};
use crate::sections::{push_log, LogEntry};

use super::cart::{Cart, Shipping};

/// Product keys `1`..`9`, `0` reach the first ten visible products.
pub const MAX_KEYED_ROWS: usize = 10;

/// Purchase modal contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseDraft {
    pub product_id: u32,
    pub quantity: u32,
    pub shipping: Shipping,
}

impl PurchaseDraft {
    pub fn new(product_id: u32) -> Self {
        Self {
            product_id,
            quantity: 1,
            shipping: Shipping::HomeDelivery,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Purchase(PurchaseDraft),
    Cart,
}

pub struct MarketState {
    pub filter: Filter,
    pub screen: Screen,
    pub cart: Cart,
    /// The "use a coupon" checkbox in the cart view.
    pub coupon_toggle: bool,
    /// Whether the checkbox may be ticked right now.
    pub coupon_enabled: bool,
    pub log: Vec<LogEntry>,
}

impl MarketState {
    pub fn new() -> Self {
        Self {
            filter: Filter::All,
            screen: Screen::Catalog,
            cart: Cart::new(),
            coupon_toggle: false,
            coupon_enabled: false,
            log: Vec::new(),
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        push_log(&mut self.log, text, is_important);
    }
}

/// Filter tabs in display order.
pub fn filters() -> Vec<Filter> {
    std::iter::once(Filter::All)
        .chain(ALL_CATEGORIES.iter().copied().map(Filter::Only))
        .collect()
}

/// The tab after `current`, wrapping back to All.
pub fn next_filter(current: Filter) -> Filter {
    let all = filters();
    let pos = all.iter().position(|f| *f == current).unwrap_or(0);
    all[(pos + 1) % all.len()]
}

pub fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Vegetable => "🥬",
        Category::Fruit => "🍎",
        Category::Grain => "🌾",
        Category::Gift => "🎁",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_tabs_cycle() {
        assert_eq!(filters().len(), 1 + ALL_CATEGORIES.len());
        let mut f = Filter::All;
        for _ in 0..filters().len() {
            f = next_filter(f);
        }
        assert_eq!(f, Filter::All);
        assert_eq!(next_filter(Filter::All), Filter::Only(Category::Vegetable));
    }

    #[test]
    fn new_draft_defaults() {
        let d = PurchaseDraft::new(4);
        assert_eq!((d.quantity, d.shipping), (1, Shipping::HomeDelivery));
    }
}

//! Market page transitions. Everything here is pure over `MarketState`
//! plus read access to the catalog and coupon balance.

use crate::catalog::Catalog;
use crate::session::CouponBalance;

use super::cart::coupon_eligible;
use super::state::{next_filter, MarketState, PurchaseDraft, Screen};

/// Re-derive the coupon checkbox from the cart and balance. An ineligible
/// cart disables the box and clears any tick.
pub fn sync_coupon_toggle(state: &mut MarketState, balance: CouponBalance) {
    state.coupon_enabled = coupon_eligible(state.cart.subtotal(), balance);
    if !state.coupon_enabled {
        state.coupon_toggle = false;
    }
}

/// Flip the coupon checkbox. Returns false when the box is disabled.
pub fn toggle_coupon(state: &mut MarketState, balance: CouponBalance) -> bool {
    sync_coupon_toggle(state, balance);
    if !state.coupon_enabled {
        return false;
    }
    state.coupon_toggle = !state.coupon_toggle;
    true
}

pub fn cycle_filter(state: &mut MarketState) {
    state.filter = next_filter(state.filter);
}

/// Open the purchase modal for the `index`-th product under the current filter.
pub fn open_purchase(state: &mut MarketState, catalog: &Catalog, index: usize) -> bool {
    match catalog.visible(state.filter).nth(index) {
        Some(product) => {
            state.screen = Screen::Purchase(PurchaseDraft::new(product.id));
            true
        }
        None => false,
    }
}

pub fn adjust_quantity(state: &mut MarketState, more: bool) {
    if let Screen::Purchase(draft) = &mut state.screen {
        draft.quantity = if more {
            draft.quantity.saturating_add(1)
        } else {
            draft.quantity.saturating_sub(1).max(1)
        };
    }
}

pub fn toggle_shipping(state: &mut MarketState) {
    if let Screen::Purchase(draft) = &mut state.screen {
        draft.shipping = draft.shipping.toggled();
    }
}

/// Put the drafted product in the cart and close the modal. Returns the
/// product name, or `None` when no modal is open or the product was removed.
pub fn confirm_purchase(
    state: &mut MarketState,
    catalog: &Catalog,
    balance: CouponBalance,
) -> Option<String> {
    let Screen::Purchase(draft) = state.screen else {
        return None;
    };
    state.screen = Screen::Catalog;
    let product = catalog.get(draft.product_id)?;
    state
        .cart
        .add_item(&product.name, product.price, draft.quantity, draft.shipping);
    sync_coupon_toggle(state, balance);
    Some(product.name.clone())
}

pub fn remove_line(state: &mut MarketState, index: usize, balance: CouponBalance) -> Option<String> {
    let line = state.cart.remove_item(index)?;
    sync_coupon_toggle(state, balance);
    Some(line.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Filter};
    use crate::sections::market::cart::Shipping;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"products":[
                {"name":"高麗菜","price":80,"category":"vegetable"},
                {"name":"蘋果","price":150,"category":"fruit"},
                {"name":"禮盒","price":500,"category":"gift"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn purchase_flow_adds_to_cart() {
        let catalog = catalog();
        let mut s = MarketState::new();
        assert!(open_purchase(&mut s, &catalog, 1));
        adjust_quantity(&mut s, true);
        adjust_quantity(&mut s, true);
        toggle_shipping(&mut s);
        let name = confirm_purchase(&mut s, &catalog, CouponBalance::new(0));
        assert_eq!(name.as_deref(), Some("蘋果"));
        assert_eq!(s.screen, Screen::Catalog);
        let line = &s.cart.lines()[0];
        assert_eq!((line.quantity, line.shipping), (3, Shipping::StorePickup));
    }

    #[test]
    fn quantity_floor_is_one() {
        let catalog = catalog();
        let mut s = MarketState::new();
        open_purchase(&mut s, &catalog, 0);
        adjust_quantity(&mut s, false);
        adjust_quantity(&mut s, false);
        assert!(matches!(s.screen, Screen::Purchase(d) if d.quantity == 1));
    }

    #[test]
    fn purchase_index_follows_filter() {
        let catalog = catalog();
        let mut s = MarketState::new();
        s.filter = Filter::Only(Category::Gift);
        assert!(open_purchase(&mut s, &catalog, 0));
        assert!(!open_purchase(&mut s, &catalog, 1));
        confirm_purchase(&mut s, &catalog, CouponBalance::new(0));
        assert_eq!(s.cart.lines()[0].name, "禮盒");
    }

    #[test]
    fn toggle_disables_when_cart_drops_below_minimum() {
        let catalog = catalog();
        let coupons = CouponBalance::new(1);
        let mut s = MarketState::new();
        open_purchase(&mut s, &catalog, 1);
        adjust_quantity(&mut s, true);
        confirm_purchase(&mut s, &catalog, coupons);
        open_purchase(&mut s, &catalog, 0);
        confirm_purchase(&mut s, &catalog, coupons);
        assert_eq!(s.cart.subtotal(), 380);
        assert!(toggle_coupon(&mut s, coupons));
        assert!(s.coupon_toggle);

        remove_line(&mut s, 0, coupons);
        assert_eq!(s.cart.subtotal(), 80);
        assert!(!s.coupon_enabled);
        assert!(!s.coupon_toggle);
        assert!(!toggle_coupon(&mut s, coupons));
    }

    #[test]
    fn no_coupons_means_disabled() {
        let catalog = catalog();
        let mut s = MarketState::new();
        open_purchase(&mut s, &catalog, 2);
        confirm_purchase(&mut s, &catalog, CouponBalance::new(0));
        assert!(!toggle_coupon(&mut s, CouponBalance::new(0)));
    }

    #[test]
    fn confirm_without_modal_is_noop() {
        let mut s = MarketState::new();
        assert_eq!(confirm_purchase(&mut s, &catalog(), CouponBalance::new(0)), None);
        assert!(s.cart.is_empty());
    }
}

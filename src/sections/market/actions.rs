//! Semantic action IDs for the market's click targets.

// ── Catalog ─────────────────────────────────────────────────────
pub const OPEN_CART: u16 = 0;
pub const CYCLE_FILTER: u16 = 1;
/// Base + filter tab index (0 = all, then categories).
pub const FILTER_BASE: u16 = 10;
/// Base + visible product index.
pub const PRODUCT_BASE: u16 = 100;

// ── Purchase modal ──────────────────────────────────────────────
pub const QTY_LESS: u16 = 20;
pub const QTY_MORE: u16 = 21;
pub const TOGGLE_SHIPPING: u16 = 22;
pub const CONFIRM_ADD: u16 = 23;
pub const CLOSE_MODAL: u16 = 24;

// ── Cart view ───────────────────────────────────────────────────
pub const TOGGLE_COUPON: u16 = 30;
pub const CHECKOUT: u16 = 31;
pub const BACK_TO_CATALOG: u16 = 32;
/// Base + cart line index.
pub const REMOVE_LINE_BASE: u16 = 300;

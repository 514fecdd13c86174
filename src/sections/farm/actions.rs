//! Semantic action IDs for the farm's click targets.

// ── Field actions ───────────────────────────────────────────────
pub const PRIMARY_ACTION: u16 = 0;
pub const FORCE_HARVEST: u16 = 1;
pub const REFILL_WATER: u16 = 2;
pub const USE_FERTILIZER: u16 = 3;
pub const USE_PESTICIDE: u16 = 4;
pub const OPEN_SHOP: u16 = 5;
pub const END_TURN: u16 = 6;

// ── Day cycle ───────────────────────────────────────────────────
pub const CONFIRM_FORECAST: u16 = 10;
pub const RESTART: u16 = 11;

// ── Overlays ────────────────────────────────────────────────────
pub const OPEN_TUTORIAL: u16 = 20;
pub const CLOSE_OVERLAY: u16 = 21;

// ── Shop (quantity steppers and purchase) ───────────────────────
pub const FERTILIZER_LESS: u16 = 30;
pub const FERTILIZER_MORE: u16 = 31;
pub const BUY_FERTILIZER: u16 = 32;
pub const PESTICIDE_LESS: u16 = 33;
pub const PESTICIDE_MORE: u16 = 34;
pub const BUY_PESTICIDE: u16 = 35;

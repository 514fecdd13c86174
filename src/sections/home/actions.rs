//! Semantic action IDs for the home page's click targets.

// ── Marquee controls ────────────────────────────────────────────
pub const SCROLL_LEFT: u16 = 0;
pub const SCROLL_RIGHT: u16 = 1;
pub const TOGGLE_PAUSE: u16 = 2;

// ── Overlays ────────────────────────────────────────────────────
pub const OPEN_THEMES: u16 = 10;
pub const CLOSE_OVERLAY: u16 = 11;

/// Base + featured product index (list rows below the marquee).
pub const FEATURED_BASE: u16 = 100;
/// Base + product id (segments of the scrolling strip).
pub const STRIP_PRODUCT_BASE: u16 = 1000;
/// Base + index into `ALL_THEMES`.
pub const THEME_BASE: u16 = 200;

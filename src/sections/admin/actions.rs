/// Semantic action IDs for the admin panel click targets.

// Login form
pub const FOCUS_USERNAME: u16 = 0;
pub const FOCUS_PASSWORD: u16 = 1;
pub const SUBMIT_LOGIN: u16 = 2;

// Logged-in panel
pub const LOGOUT: u16 = 10;
pub const FOCUS_NAME: u16 = 20;
pub const FOCUS_PRICE: u16 = 21;
pub const CYCLE_CATEGORY: u16 = 22;
pub const SUBMIT_PRODUCT: u16 = 23;

/// Remove the product at list position `id - REMOVE_BASE`.
pub const REMOVE_BASE: u16 = 100;

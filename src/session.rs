//! Page-level session values that survive reloads: coupon balance, login
//! flag and background theme.

use crate::storage::{KeyValueStore, KEY_COUPONS, KEY_LOGGED_IN, KEY_THEME, KEY_USERNAME};
use crate::theme::FarmTheme;

/// Redeemable flat-discount vouchers, earned by finishing a farm run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CouponBalance(u32);

impl CouponBalance {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn count(self) -> u32 {
        self.0
    }

    pub fn award(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Use one coupon. Returns false (and changes nothing) when none are left.
    pub fn redeem(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }

    /// Parse a stored value. Anything that is not a non-negative integer
    /// counts as zero, as the page always did.
    pub fn parse(raw: Option<&str>) -> Self {
        let count = raw
            .map(str::trim)
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX));
        Self::new(count)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub coupons: CouponBalance,
    /// Logged-in admin name.
    pub user: Option<String>,
    pub theme: Option<FarmTheme>,
}

impl Session {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let logged_in = store.get(KEY_LOGGED_IN).as_deref() == Some("true");
        let user = if logged_in {
            Some(store.get(KEY_USERNAME).unwrap_or_default())
        } else {
            None
        };
        Self {
            coupons: CouponBalance::parse(store.get(KEY_COUPONS).as_deref()),
            user,
            theme: store.get(KEY_THEME).as_deref().and_then(FarmTheme::from_key),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn save_coupons(&self, store: &mut dyn KeyValueStore) {
        store.set(KEY_COUPONS, &self.coupons.count().to_string());
    }

    pub fn log_in(&mut self, store: &mut dyn KeyValueStore, username: &str) {
        store.set(KEY_LOGGED_IN, "true");
        store.set(KEY_USERNAME, username);
        self.user = Some(username.to_string());
    }

    pub fn log_out(&mut self, store: &mut dyn KeyValueStore) {
        store.remove(KEY_LOGGED_IN);
        store.remove(KEY_USERNAME);
        self.user = None;
    }

    pub fn set_theme(&mut self, store: &mut dyn KeyValueStore, theme: FarmTheme) {
        store.set(KEY_THEME, theme.key());
        self.theme = Some(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn coupon_parse_follows_parse_int_or_zero() {
        assert_eq!(CouponBalance::parse(None).count(), 0);
        assert_eq!(CouponBalance::parse(Some("")).count(), 0);
        assert_eq!(CouponBalance::parse(Some("abc")).count(), 0);
        assert_eq!(CouponBalance::parse(Some("-3")).count(), 0);
        assert_eq!(CouponBalance::parse(Some("4")).count(), 4);
        assert_eq!(CouponBalance::parse(Some(" 2 ")).count(), 2);
    }

    #[test]
    fn redeem_never_goes_negative() {
        let mut c = CouponBalance::new(1);
        assert!(c.redeem());
        assert!(!c.redeem());
        assert_eq!(c.count(), 0);
    }

    #[test]
    fn load_reads_all_keys() {
        let store = MemoryStore::with(&[
            (KEY_COUPONS, "3"),
            (KEY_LOGGED_IN, "true"),
            (KEY_USERNAME, "admin"),
            (KEY_THEME, "rainy"),
        ]);
        let s = Session::load(&store);
        assert_eq!(s.coupons.count(), 3);
        assert_eq!(s.user.as_deref(), Some("admin"));
        assert_eq!(s.theme, Some(FarmTheme::Rainy));
    }

    #[test]
    fn login_flag_must_be_exactly_true() {
        let store = MemoryStore::with(&[(KEY_LOGGED_IN, "yes"), (KEY_USERNAME, "admin")]);
        assert!(!Session::load(&store).is_logged_in());
    }

    #[test]
    fn login_logout_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut s = Session::load(&store);
        s.log_in(&mut store, "admin");
        assert!(Session::load(&store).is_logged_in());

        s.log_out(&mut store);
        assert!(!s.is_logged_in());
        assert_eq!(store.get(KEY_LOGGED_IN), None);
        assert_eq!(store.get(KEY_USERNAME), None);
    }

    #[test]
    fn coupons_and_theme_persist() {
        let mut store = MemoryStore::new();
        let mut s = Session::load(&store);
        s.coupons.award();
        s.coupons.award();
        s.save_coupons(&mut store);
        s.set_theme(&mut store, FarmTheme::Night);

        let reloaded = Session::load(&store);
        assert_eq!(reloaded.coupons.count(), 2);
        assert_eq!(reloaded.theme, Some(FarmTheme::Night));
    }
}

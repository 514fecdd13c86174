//! Shopping cart and checkout rules.

use thiserror::Error;

use crate::prompt::Prompt;
use crate::session::CouponBalance;

/// Flat discount of one coupon.
pub const COUPON_VALUE: u32 = 100;
/// Minimum subtotal before a coupon may be used.
pub const COUPON_MIN_SUBTOTAL: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shipping {
    HomeDelivery,
    StorePickup,
}

impl Shipping {
    pub fn label(self) -> &'static str {
        match self {
            Shipping::HomeDelivery => "宅配到府",
            Shipping::StorePickup => "超商取貨",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Shipping::HomeDelivery => Shipping::StorePickup,
            Shipping::StorePickup => Shipping::HomeDelivery,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub unit_price: u32,
    pub quantity: u32,
    pub shipping: Shipping,
}

impl CartLine {
    pub fn line_total(&self) -> u32 {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// Lines are unique per (name, shipping); adding a duplicate merges quantities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, name: &str, unit_price: u32, quantity: u32, shipping: Shipping) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.name == name && l.shipping == shipping)
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }
        self.lines.push(CartLine {
            name: name.to_string(),
            unit_price,
            quantity,
            shipping,
        });
    }

    pub fn remove_item(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn subtotal(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, l| sum.saturating_add(l.line_total()))
    }

    /// Units across all lines; the cart badge.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().fold(0u32, |sum, l| sum.saturating_add(l.quantity))
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

pub fn display_total(subtotal: u32, coupon_applied: bool) -> u32 {
    if coupon_applied {
        subtotal.saturating_sub(COUPON_VALUE)
    } else {
        subtotal
    }
}

pub fn coupon_eligible(subtotal: u32, balance: CouponBalance) -> bool {
    subtotal >= COUPON_MIN_SUBTOTAL && balance.count() > 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("購物車是空的，無法結帳！")]
    EmptyCart,
    #[error("無法使用抵用券：金額不足或無券可用")]
    CouponUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub subtotal: u32,
    pub discount: u32,
    pub total: u32,
}

impl Receipt {
    pub fn summary(&self) -> String {
        let mut msg = format!("結帳成功！\n\n小計: NT$ {}\n", self.subtotal);
        if self.discount > 0 {
            msg.push_str(&format!("折扣: NT$ {} (抵用券)\n", self.discount));
        }
        msg.push_str(&format!("實付金額: NT$ {}\n\n感謝您的購買！", self.total));
        msg
    }
}

fn forgot_coupon_message(balance: CouponBalance) -> String {
    format!(
        "您達到低消且持有 {} 張抵用券，忘記使用了嗎？\n\n按「確定」立即折抵 NT$ {COUPON_VALUE}\n按「取消」維持原價結帳",
        balance.count()
    )
}

/// Settle the cart. On success the cart is empty and, if a coupon was used,
/// `coupons` is one lower. On error nothing changes.
pub fn checkout(
    cart: &mut Cart,
    coupon_requested: bool,
    coupons: &mut CouponBalance,
    prompt: &mut dyn Prompt,
) -> Result<Receipt, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let subtotal = cart.subtotal();
    let eligible = coupon_eligible(subtotal, *coupons);

    let use_coupon = match (coupon_requested, eligible) {
        (true, true) => true,
        (true, false) => return Err(CheckoutError::CouponUnavailable),
        (false, true) => prompt.confirm(&forgot_coupon_message(*coupons)),
        (false, false) => false,
    };

    let discount = if use_coupon && coupons.redeem() {
        COUPON_VALUE
    } else {
        0
    };
    cart.clear();
    Ok(Receipt {
        subtotal,
        discount,
        total: subtotal.saturating_sub(discount),
    })
}

//! Voucher types.

use crate::ids::VoucherId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How a voucher discounts a qualifying subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VoucherKind {
    /// Percentage off (0.0 - 100.0), optionally capped.
    Percentage {
        percent: f64,
        /// Upper bound on the discount amount, if any.
        max_discount: Option<Money>,
    },
    /// Flat amount off.
    Fixed(Money),
}

/// A discount voucher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voucher {
    /// Unique voucher identifier.
    pub id: VoucherId,
    /// Code the customer enters (e.g., "GEAR10").
    pub code: String,
    /// Discount rule.
    pub kind: VoucherKind,
    /// Minimum selected subtotal for the voucher to apply.
    pub min_order_value: Money,
    /// Whether the voucher is currently active.
    pub active: bool,
}

impl Voucher {
    /// Create a percentage voucher.
    pub fn percentage(code: impl Into<String>, percent: f64, min_order_value: Money) -> Self {
        Self {
            id: VoucherId::generate(),
            code: code.into(),
            kind: VoucherKind::Percentage {
                percent,
                max_discount: None,
            },
            min_order_value,
            active: true,
        }
    }

    /// Create a fixed-amount voucher.
    pub fn fixed(code: impl Into<String>, amount: Money, min_order_value: Money) -> Self {
        Self {
            id: VoucherId::generate(),
            code: code.into(),
            kind: VoucherKind::Fixed(amount),
            min_order_value,
            active: true,
        }
    }

    /// Cap a percentage voucher's discount amount.
    pub fn with_max_discount(mut self, max: Money) -> Self {
        if let VoucherKind::Percentage { max_discount, .. } = &mut self.kind {
            *max_discount = Some(max);
        }
        self
    }

    /// Discount for a selected subtotal.
    ///
    /// Zero when inactive or below the minimum order value. The result is
    /// clamped to `[0, subtotal]` so a total can never go negative.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        if !self.active || subtotal.amount_minor < self.min_order_value.amount_minor {
            return Money::zero(subtotal.currency);
        }

        let raw = match &self.kind {
            VoucherKind::Percentage {
                percent,
                max_discount,
            } => {
                let amount = subtotal.percentage(*percent);
                match max_discount {
                    Some(cap) => amount.min(cap).unwrap_or(amount),
                    None => amount,
                }
            }
            VoucherKind::Fixed(amount) => *amount,
        };

        // A voucher denominated in another currency cannot apply.
        match raw.min(&subtotal) {
            Some(clamped) => clamped.max_zero(),
            None => Money::zero(subtotal.currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn vnd(amount: i64) -> Money {
        Money::new(amount, Currency::VND)
    }

    #[test]
    fn test_percentage_voucher() {
        let v = Voucher::percentage("GEAR10", 10.0, vnd(0));
        assert_eq!(v.discount_for(vnd(200_000)).amount_minor, 20_000);
    }

    #[test]
    fn test_percentage_voucher_capped() {
        let v = Voucher::percentage("GEAR50", 50.0, vnd(0)).with_max_discount(vnd(30_000));
        assert_eq!(v.discount_for(vnd(200_000)).amount_minor, 30_000);
    }

    #[test]
    fn test_fixed_voucher_clamped_to_subtotal() {
        let v = Voucher::fixed("FLAT100K", vnd(100_000), vnd(0));
        assert_eq!(v.discount_for(vnd(40_000)).amount_minor, 40_000);
    }

    #[test]
    fn test_below_minimum_order_value() {
        let v = Voucher::fixed("BIGSPEND", vnd(50_000), vnd(500_000));
        assert_eq!(v.discount_for(vnd(499_999)).amount_minor, 0);
        assert_eq!(v.discount_for(vnd(500_000)).amount_minor, 50_000);
    }

    #[test]
    fn test_inactive_voucher() {
        let mut v = Voucher::percentage("OLD", 10.0, vnd(0));
        v.active = false;
        assert!(v.discount_for(vnd(100_000)).is_zero());
    }
}

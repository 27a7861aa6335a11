//! Cart totals derivation.
//!
//! Pure computation over the cart's line items: the subtotal covers selected
//! lines only, the badge count covers everything.

use crate::cart::{Cart, Voucher};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat-fee shipping with a free threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShippingPolicy {
    /// Fee charged below the threshold.
    pub flat_fee: Money,
    /// Selected subtotal at which shipping becomes free.
    pub free_threshold: Money,
}

impl ShippingPolicy {
    /// Create a shipping policy.
    pub fn new(flat_fee: Money, free_threshold: Money) -> Self {
        Self {
            flat_fee,
            free_threshold,
        }
    }

    /// Fee for a selected subtotal. Zero at or above the threshold, and zero
    /// when nothing is selected (there is nothing to ship).
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if subtotal.is_zero() || subtotal.amount_minor >= self.free_threshold.amount_minor {
            Money::zero(subtotal.currency)
        } else {
            self.flat_fee
        }
    }
}

/// Complete totals breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Quantity across all lines — the cart badge number.
    pub total_items: u64,
    /// Quantity across selected lines — the checkout summary number.
    pub selected_items: u64,
    /// Sum of unit price x quantity over selected lines.
    pub subtotal: Money,
    /// Voucher discount, clamped so the total stays >= 0.
    pub discount: Money,
    /// Shipping fee after the free threshold.
    pub shipping_fee: Money,
    /// max(0, subtotal - discount) + shipping fee.
    pub grand_total: Money,
}

impl CartTotals {
    /// Compute totals for a cart with an optional voucher.
    pub fn compute(
        cart: &Cart,
        voucher: Option<&Voucher>,
        shipping: &ShippingPolicy,
    ) -> Result<Self, CommerceError> {
        let currency = cart.currency;

        let mut subtotal = Money::zero(currency);
        for item in cart.selected_items() {
            if item.unit_price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: item.unit_price.currency.code().to_string(),
                });
            }
            let line = item.line_total().ok_or(CommerceError::Overflow)?;
            subtotal = subtotal.try_add(&line).ok_or(CommerceError::Overflow)?;
        }

        let discount = voucher
            .map(|v| v.discount_for(subtotal))
            .unwrap_or_else(|| Money::zero(currency));

        let shipping_fee = shipping.fee_for(subtotal);

        let goods = subtotal
            .try_sub(&discount)
            .ok_or(CommerceError::Overflow)?
            .max_zero();
        let grand_total = goods
            .try_add(&shipping_fee)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            total_items: cart.item_count(),
            selected_items: cart.selected_count(),
            subtotal,
            discount,
            shipping_fee,
            grand_total,
        })
    }

    /// Check if any discount applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

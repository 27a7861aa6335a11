//! Order types and the submission payload.

use crate::cart::{current_timestamp, Cart, Voucher};
use crate::checkout::Address;
use crate::error::CommerceError;
use crate::ids::{CustomerId, OrderId, PaymentMethodId, ProductId, VoucherId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status as reported by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Order confirmed and processing.
    Confirmed,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// One product line in an order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderProduct {
    /// Product identity.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: u32,
    /// Unit price in minor units, as snapshotted in the cart.
    pub price: i64,
}

/// The `POST /orders` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    /// Ordering customer.
    pub customer_id: CustomerId,
    /// Where to ship.
    pub shipping_address: Address,
    /// Selected payment method.
    pub payment_method_id: PaymentMethodId,
    /// Applied voucher, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_id: Option<VoucherId>,
    /// The selected cart lines.
    pub products: Vec<OrderProduct>,
}

impl OrderRequest {
    /// Build an order from the cart's selected lines.
    ///
    /// Fails when nothing is selected or the address is incomplete. Prices
    /// are the add-time snapshots; the backend revalidates stock and price.
    pub fn from_selected(
        cart: &Cart,
        customer_id: CustomerId,
        shipping_address: Address,
        payment_method_id: PaymentMethodId,
        voucher: Option<&Voucher>,
    ) -> Result<Self, CommerceError> {
        shipping_address.validate()?;

        let products: Vec<OrderProduct> = cart
            .selected_items()
            .map(|item| OrderProduct {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price: item.unit_price.amount_minor,
            })
            .collect();

        if products.is_empty() {
            return Err(CommerceError::EmptySelection);
        }

        Ok(Self {
            customer_id,
            shipping_address,
            payment_method_id,
            voucher_id: voucher.map(|v| v.id.clone()),
            products,
        })
    }
}

/// A created order, as returned by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Current status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Total charged.
    pub grand_total: Money,
    /// Unix timestamp of creation.
    #[serde(default = "current_timestamp")]
    pub created_at: i64,
}

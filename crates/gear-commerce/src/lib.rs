//! Cart and order domain types for the GearCart storefront.
//!
//! This crate is the pure core: no I/O, no persistence, no clocks beyond
//! Unix timestamps on mutation.
//!
//! - **Cart**: line items keyed by `(product_id, variant)`, selection flags
//!   for partial checkout, merge-on-login
//! - **Totals**: selected-only subtotal, voucher discounts, flat-fee
//!   shipping with a free threshold
//! - **Checkout**: address validation and the order submission payload
//! - **Drawer**: the two-state cart drawer machine
//!
//! # Example
//!
//! ```rust
//! use gear_commerce::prelude::*;
//!
//! let mouse = ProductSnapshot::new(
//!     "mouse-g502",
//!     "Wired Gaming Mouse",
//!     Money::new(890_000, Currency::VND),
//! );
//!
//! let mut cart = Cart::new("sess-1");
//! cart.add_item(&mouse, Some("black".into()), 1);
//! cart.add_item(&mouse, Some("black".into()), 1);
//! assert_eq!(cart.item_count(), 2);
//!
//! let shipping = ShippingPolicy::new(
//!     Money::new(30_000, Currency::VND),
//!     Money::new(500_000, Currency::VND),
//! );
//! // 1,780,000 clears the free-shipping threshold.
//! let totals = CartTotals::compute(&cart, None, &shipping).unwrap();
//! assert_eq!(totals.grand_total.amount_minor, 1_780_000);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod drawer;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{Cart, CartTotals, LineItem, ShippingPolicy, Voucher, VoucherKind};
    pub use crate::catalog::ProductSnapshot;
    pub use crate::checkout::{Address, Order, OrderProduct, OrderRequest, OrderStatus};
    pub use crate::drawer::{CartDrawer, CloseTrigger, DrawerState, OpenTrigger};
}

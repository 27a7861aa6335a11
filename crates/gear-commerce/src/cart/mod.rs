//! Shopping cart module.
//!
//! Contains the cart and line item types, vouchers, and totals derivation.

mod cart;
mod totals;
mod voucher;

pub use cart::{Cart, LineItem};
pub use totals::{CartTotals, ShippingPolicy};
pub use voucher::{Voucher, VoucherKind};

pub(crate) use cart::current_timestamp;

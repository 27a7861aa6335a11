//! Catalog boundary types.
//!
//! The catalog service owns product data; the cart only snapshots what it
//! needs at add time. Price and stock are not revalidated on every read —
//! the backend re-checks at checkout.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as returned by `GET /products/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSnapshot {
    /// Stable product identity.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current price.
    pub price: Money,
    /// Units available.
    pub stock: i64,
    /// Variant options (e.g., colors), empty when the product has none.
    #[serde(default)]
    pub variants: Vec<String>,
}

impl ProductSnapshot {
    /// Create a snapshot.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: 0,
            variants: Vec::new(),
        }
    }

    /// Set the available stock.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Set the variant options.
    pub fn with_variants(mut self, variants: Vec<String>) -> Self {
        self.variants = variants;
        self
    }

    /// Check whether any stock is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

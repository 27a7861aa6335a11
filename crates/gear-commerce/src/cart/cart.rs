//! Cart and line item types.
//!
//! A line item is identified by its `(product_id, variant)` pair: the same
//! product in two colors is two lines, the same product twice is one line
//! with a higher quantity.

use crate::catalog::ProductSnapshot;
use crate::ids::{CartId, CustomerId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Variant option (e.g., color). Part of the line item identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Product name snapshot for display.
    pub name: String,
    /// Quantity, always >= 1. A requested quantity of 0 removes the line.
    pub quantity: u32,
    /// Unit price snapshot taken at add time.
    pub unit_price: Money,
    /// Whether the line participates in checkout.
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl LineItem {
    /// Create a line item from a product snapshot.
    pub fn new(product: &ProductSnapshot, variant: Option<String>, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            variant,
            name: product.name.clone(),
            quantity: quantity.max(1),
            unit_price: product.price,
            selected: true,
        }
    }

    /// Check whether this line has the given identity.
    pub fn matches(&self, product_id: &ProductId, variant: Option<&str>) -> bool {
        &self.product_id == product_id && self.variant.as_deref() == variant
    }

    /// Line total, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_mul(i64::from(self.quantity))
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Session ID for guest carts.
    pub session_id: String,
    /// Customer ID for authenticated carts.
    pub customer_id: Option<CustomerId>,
    /// Items in display order.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last mutation.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart for a session.
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            session_id: session_id.into(),
            customer_id: None,
            items: Vec::new(),
            currency: Currency::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an empty cart for an authenticated customer.
    pub fn for_customer(customer_id: CustomerId, session_id: impl Into<String>) -> Self {
        let mut cart = Self::new(session_id);
        cart.customer_id = Some(customer_id);
        cart
    }

    /// Add an item to the cart.
    ///
    /// An existing `(product_id, variant)` line gains the quantity and is
    /// re-marked selected; otherwise a new selected line is appended. Never
    /// fails: stock is checked by the backend at checkout, not here.
    pub fn add_item(&mut self, product: &ProductSnapshot, variant: Option<String>, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.matches(&product.id, variant.as_deref()))
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            existing.selected = true;
        } else {
            self.items.push(LineItem::new(product, variant, quantity));
        }
        self.touch();
    }

    /// Update the quantity of a line item.
    ///
    /// A quantity of 0 removes the line. Returns whether a matching line
    /// existed.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        variant: Option<&str>,
        quantity: u32,
    ) -> bool {
        if quantity == 0 {
            return self.remove_item(product_id, variant);
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.matches(product_id, variant))
        {
            item.quantity = quantity;
            self.touch();
            true
        } else {
            false
        }
    }

    /// Remove a line item. Removing an absent line is a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId, variant: Option<&str>) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.matches(product_id, variant));
        let removed = self.items.len() < len_before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Flip the selection flag of a line item.
    pub fn toggle_selected(&mut self, product_id: &ProductId, variant: Option<&str>) -> bool {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.matches(product_id, variant))
        {
            item.selected = !item.selected;
            self.touch();
            true
        } else {
            false
        }
    }

    /// Mark every line item selected.
    pub fn select_all(&mut self) {
        for item in &mut self.items {
            item.selected = true;
        }
        self.touch();
    }

    /// Drop the selected lines, keeping the rest.
    ///
    /// Used after a successful checkout: the purchased subset leaves the
    /// cart, unselected lines stay for later.
    pub fn remove_selected(&mut self) {
        self.items.retain(|i| !i.selected);
        self.touch();
    }

    /// Mark every line item unselected.
    pub fn deselect_all(&mut self) {
        for item in &mut self.items {
            item.selected = false;
        }
        self.touch();
    }

    /// Get a line item by identity.
    pub fn get(&self, product_id: &ProductId, variant: Option<&str>) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(product_id, variant))
    }

    /// Total quantity across all lines (cart badge count).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Total quantity across selected lines (checkout summary count).
    pub fn selected_count(&self) -> u64 {
        self.selected_items().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the selected lines.
    pub fn selected_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|i| i.selected)
    }

    /// Replace the item list wholesale (used when loading persisted state).
    pub fn set_items(&mut self, items: Vec<LineItem>) {
        self.items = items;
        self.touch();
    }

    /// Fold another cart's items into this one, keyed by line identity.
    ///
    /// Quantities add saturating. Used when a guest logs in and their local
    /// cart joins the server cart.
    pub fn merge(&mut self, other: Cart) {
        for item in other.items {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.matches(&item.product_id, item.variant.as_deref()))
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                existing.selected = existing.selected || item.selected;
            } else {
                self.items.push(item);
            }
        }
        self.touch();
    }

    /// Attach a customer identity (on login).
    pub fn set_customer(&mut self, customer_id: CustomerId) {
        self.customer_id = Some(customer_id);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new("anonymous")
    }
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> ProductSnapshot {
        ProductSnapshot::new("mouse-g502", "Wired Gaming Mouse", Money::new(890_000, Currency::VND))
    }

    fn keyboard() -> ProductSnapshot {
        ProductSnapshot::new("kb-87", "TKL Keyboard", Money::new(1_290_000, Currency::VND))
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new("sess-1");
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::new("sess-1");
        for _ in 0..3 {
            cart.add_item(&mouse(), None, 1);
        }
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
        assert!(cart.get(&"mouse-g502".into(), None).unwrap().selected);
    }

    #[test]
    fn test_variants_are_distinct_lines() {
        let mut cart = Cart::new("sess-1");
        cart.add_item(&mouse(), Some("black".into()), 1);
        cart.add_item(&mouse(), Some("white".into()), 1);
        cart.add_item(&mouse(), Some("black".into()), 1);
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(
            cart.get(&"mouse-g502".into(), Some("black")).unwrap().quantity,
            2
        );
    }

    #[test]
    fn test_add_remarks_selected() {
        let mut cart = Cart::new("sess-1");
        cart.add_item(&mouse(), None, 1);
        cart.deselect_all();
        cart.add_item(&mouse(), None, 1);
        assert!(cart.get(&"mouse-g502".into(), None).unwrap().selected);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut a = Cart::new("sess-1");
        a.add_item(&mouse(), None, 2);
        let mut b = a.clone();

        a.update_quantity(&"mouse-g502".into(), None, 0);
        b.remove_item(&"mouse-g502".into(), None);
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn test_remove_absent_is_idempotent() {
        let mut cart = Cart::new("sess-1");
        cart.add_item(&keyboard(), None, 1);
        let before = cart.items.clone();
        assert!(!cart.remove_item(&"ghost".into(), None));
        assert!(!cart.remove_item(&"ghost".into(), None));
        assert_eq!(cart.items, before);
    }

    #[test]
    fn test_update_absent_returns_false() {
        let mut cart = Cart::new("sess-1");
        assert!(!cart.update_quantity(&"ghost".into(), None, 5));
    }

    #[test]
    fn test_selection_flips() {
        let mut cart = Cart::new("sess-1");
        cart.add_item(&mouse(), None, 1);
        cart.add_item(&keyboard(), None, 1);

        cart.toggle_selected(&"mouse-g502".into(), None);
        assert!(!cart.get(&"mouse-g502".into(), None).unwrap().selected);
        assert_eq!(cart.selected_count(), 1);

        cart.select_all();
        assert_eq!(cart.selected_count(), 2);

        cart.deselect_all();
        assert_eq!(cart.selected_count(), 0);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove_selected_keeps_the_rest() {
        let mut cart = Cart::new("sess-1");
        cart.add_item(&mouse(), None, 2);
        cart.add_item(&keyboard(), None, 1);
        cart.toggle_selected(&"kb-87".into(), None);

        cart.remove_selected();
        assert_eq!(cart.unique_item_count(), 1);
        assert!(cart.get(&"kb-87".into(), None).is_some());
    }

    #[test]
    fn test_add_zero_quantity_clamps_to_one() {
        let mut cart = Cart::new("sess-1");
        cart.add_item(&mouse(), None, 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_merge_guest_into_server() {
        let mut server = Cart::for_customer("cust-1".into(), "sess-a");
        server.add_item(&mouse(), None, 1);

        let mut guest = Cart::new("sess-b");
        guest.add_item(&mouse(), None, 2);
        guest.add_item(&keyboard(), None, 1);

        server.merge(guest);
        assert_eq!(server.unique_item_count(), 2);
        assert_eq!(server.get(&"mouse-g502".into(), None).unwrap().quantity, 3);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(&mouse(), None, 3);
        assert_eq!(item.line_total().unwrap().amount_minor, 2_670_000);
    }
}

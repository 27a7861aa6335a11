//! Cart persistence backends for the GearCart storefront.
//!
//! One trait, three stores:
//!
//! - [`LocalStore`]: a JSON document on disk, the guest-session durability
//!   mechanism
//! - [`RemoteStore`]: the authenticated cart service, reached through
//!   [`ApiClient`]
//! - [`MemoryStore`]: an in-process store for tests
//!
//! The session layer decides which backend a cart lives in; stores only
//! move line items in and out of durability.

mod envelope;
mod error;
mod local;
mod memory;
mod remote;

pub use envelope::Envelope;
pub use error::StoreError;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use remote::{ApiClient, RemoteStore};

use async_trait::async_trait;
use gear_commerce::cart::LineItem;
use gear_commerce::checkout::{Order, OrderRequest};

/// A durable home for cart line items.
///
/// Object-safe so the session layer can hold `Arc<dyn CartStore>` and swap
/// backends when auth state changes.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Read the persisted items. `None` means nothing was ever persisted,
    /// which is distinct from an explicitly cleared (empty) cart.
    async fn load(&self) -> Result<Option<Vec<LineItem>>, StoreError>;

    /// Persist the full item list.
    async fn save(&self, items: &[LineItem]) -> Result<(), StoreError>;

    /// Persist an explicitly empty cart.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// The order submission boundary.
///
/// [`ApiClient`] is the production implementation; tests substitute their
/// own.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit an order, returning the created order or the service's
    /// validation errors.
    async fn submit(&self, request: &OrderRequest) -> Result<Order, StoreError>;
}

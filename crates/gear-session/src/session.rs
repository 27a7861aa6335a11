//! The cart session facade.
//!
//! One authoritative cart state, mutated only through this type.
//! Persistence is two-tier: every mutation mirrors to the local store, and
//! authenticated sessions additionally schedule a debounced server write.
//! Persistence failures never reach the caller of a mutation; they are
//! logged and the next mutation's write cycle retries.

use crate::config::SessionConfig;
use crate::writer::DebouncedWriter;
use gear_commerce::cart::{Cart, CartTotals, ShippingPolicy, Voucher};
use gear_commerce::catalog::ProductSnapshot;
use gear_commerce::checkout::{Address, Order, OrderRequest};
use gear_commerce::drawer::{CartDrawer, CloseTrigger, OpenTrigger};
use gear_commerce::error::CommerceError;
use gear_commerce::ids::{CustomerId, PaymentMethodId, ProductId};
use gear_store::{ApiClient, CartStore, LocalStore, OrderGateway, RemoteStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Session errors. Mutations never produce these; loading wiring and order
/// submission do.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// The operation needs an authenticated customer.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// No API base URL is configured.
    #[error("No API endpoint configured")]
    NotConfigured,

    /// Domain error (empty selection, incomplete address, overflow).
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Persistence or service error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Who owns the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Local-storage-backed guest session.
    Guest,
    /// Server-backed customer session.
    Authenticated { customer_id: CustomerId },
}

/// The cart facade: state, persistence routing, totals, and checkout
/// handoff for one storefront session.
pub struct CartSession {
    cart: Cart,
    auth: AuthState,
    local: Arc<dyn CartStore>,
    remote: Option<Arc<dyn CartStore>>,
    api: Option<Arc<ApiClient>>,
    orders: Option<Arc<dyn OrderGateway>>,
    writer: DebouncedWriter,
    voucher: Option<Voucher>,
    shipping: ShippingPolicy,
    drawer: CartDrawer,
}

impl CartSession {
    /// Create a guest session over the given local store.
    pub fn new(local: Arc<dyn CartStore>, shipping: ShippingPolicy, debounce: Duration) -> Self {
        Self {
            cart: Cart::new(generate_session_id()),
            auth: AuthState::Guest,
            local,
            remote: None,
            api: None,
            orders: None,
            writer: DebouncedWriter::new(debounce),
            voucher: None,
            shipping,
            drawer: CartDrawer::new(),
        }
    }

    /// Wire up a session from configuration.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        let local = Arc::new(LocalStore::new(&config.storage.dir));
        let mut session = Self::new(local, config.shipping_policy(), config.debounce());
        session.cart.currency = config.pricing.currency;

        if let Some(base_url) = &config.api.base_url {
            let mut api =
                ApiClient::with_timeout(base_url, Duration::from_millis(config.api.timeout_ms))?;
            if let Some(token) = &config.api.bearer_token {
                api = api.with_token(token);
            }
            session = session.with_api(Arc::new(api));
        }
        Ok(session)
    }

    /// Wire up a session from a TOML config file.
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self, SessionError> {
        let config = SessionConfig::load(path)?;
        Self::from_config(&config)
    }

    /// Attach the storefront API client (remote cart + orders).
    pub fn with_api(mut self, api: Arc<ApiClient>) -> Self {
        self.orders = Some(api.clone());
        self.api = Some(api);
        self
    }

    /// Substitute an order gateway (tests).
    pub fn with_order_gateway(mut self, orders: Arc<dyn OrderGateway>) -> Self {
        self.orders = Some(orders);
        self
    }

    // ---- loading & auth -------------------------------------------------

    /// Populate the cart from the backing store.
    ///
    /// Authenticated sessions read the server cart and fall back to the
    /// local mirror on any failure; guest sessions read the local store
    /// directly. Load failures reduce to an empty cart plus a warning.
    pub async fn load(&mut self) {
        let items = match &self.remote {
            Some(remote) => match remote.load().await {
                Ok(Some(items)) => Some(items),
                Ok(None) => self.load_local().await,
                Err(e) => {
                    warn!(error = %e, "server cart fetch failed, falling back to local");
                    self.load_local().await
                }
            },
            None => self.load_local().await,
        };
        if let Some(items) = items {
            self.cart.set_items(items);
        }
    }

    async fn load_local(&self) -> Option<Vec<gear_commerce::cart::LineItem>> {
        match self.local.load().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "local cart read failed");
                None
            }
        }
    }

    /// Switch to a server-backed cart for the customer, folding the guest
    /// cart into whatever the server already holds.
    pub async fn login(&mut self, customer_id: CustomerId) -> Result<(), SessionError> {
        let api = self.api.clone().ok_or(SessionError::NotConfigured)?;
        let remote: Arc<dyn CartStore> = Arc::new(RemoteStore::new(api, customer_id.clone()));
        self.login_with_store(customer_id, remote).await;
        Ok(())
    }

    /// [`login`](Self::login) with an explicit store (tests inject one).
    pub async fn login_with_store(&mut self, customer_id: CustomerId, remote: Arc<dyn CartStore>) {
        let server_items = match remote.load().await {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "server cart fetch failed on login, keeping guest items only");
                Vec::new()
            }
        };

        let mut server_cart =
            Cart::for_customer(customer_id.clone(), self.cart.session_id.clone());
        server_cart.currency = self.cart.currency;
        server_cart.set_items(server_items);

        let guest_cart = std::mem::replace(&mut self.cart, server_cart);
        self.cart.merge(guest_cart);

        self.auth = AuthState::Authenticated { customer_id };
        self.remote = Some(remote);
        self.persist().await;
    }

    /// Detach the server backend and return to a guest session. The cart
    /// contents stay in memory and in the local mirror.
    pub fn logout(&mut self) {
        self.writer.invalidate();
        self.remote = None;
        self.auth = AuthState::Guest;
        self.cart.customer_id = None;
    }

    /// Current auth state.
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Check if the session is server-backed.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::Authenticated { .. })
    }

    // ---- cart mutations -------------------------------------------------

    /// Add an item and open the drawer. Never fails.
    pub async fn add_item(
        &mut self,
        product: &ProductSnapshot,
        variant: Option<String>,
        quantity: u32,
    ) {
        self.cart.add_item(product, variant, quantity);
        self.drawer.open_on(OpenTrigger::ItemAdded);
        self.persist().await;
    }

    /// Set a line's quantity; 0 removes it. Returns whether the line
    /// existed.
    pub async fn update_quantity(
        &mut self,
        product_id: &ProductId,
        variant: Option<&str>,
        quantity: u32,
    ) -> bool {
        let changed = self.cart.update_quantity(product_id, variant, quantity);
        if changed {
            self.persist().await;
        }
        changed
    }

    /// Remove a line. Removing an absent line is a no-op.
    pub async fn remove_item(&mut self, product_id: &ProductId, variant: Option<&str>) -> bool {
        let removed = self.cart.remove_item(product_id, variant);
        if removed {
            self.persist().await;
        }
        removed
    }

    /// Empty the cart.
    ///
    /// The local store is written immediately (not debounced) and any
    /// pending server write is invalidated, so a stale write can never
    /// resurrect the cleared cart.
    pub async fn clear_cart(&mut self) {
        self.writer.invalidate();
        self.cart.clear();
        self.voucher = None;

        if let Err(e) = self.local.clear().await {
            warn!(error = %e, "local cart clear failed");
        }
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.clear().await {
                warn!(error = %e, "server cart clear failed");
            }
        }
    }

    /// Flip a line's selection flag.
    pub async fn toggle_selected(&mut self, product_id: &ProductId, variant: Option<&str>) -> bool {
        let changed = self.cart.toggle_selected(product_id, variant);
        if changed {
            self.persist().await;
        }
        changed
    }

    /// Select every line.
    pub async fn select_all(&mut self) {
        self.cart.select_all();
        self.persist().await;
    }

    /// Deselect every line.
    pub async fn deselect_all(&mut self) {
        self.cart.deselect_all();
        self.persist().await;
    }

    // ---- vouchers & totals ----------------------------------------------

    /// Apply a voucher, replacing any previous one.
    pub fn apply_voucher(&mut self, voucher: Voucher) {
        self.voucher = Some(voucher);
    }

    /// Remove the active voucher.
    pub fn remove_voucher(&mut self) {
        self.voucher = None;
    }

    /// The active voucher.
    pub fn voucher(&self) -> Option<&Voucher> {
        self.voucher.as_ref()
    }

    /// Current totals under the active voucher and shipping policy.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        CartTotals::compute(&self.cart, self.voucher.as_ref(), &self.shipping)
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Badge count: quantity across all lines.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    // ---- drawer ----------------------------------------------------------

    /// Open the cart drawer.
    pub fn open_drawer(&mut self, trigger: OpenTrigger) {
        self.drawer.open_on(trigger);
    }

    /// Close the cart drawer.
    pub fn close_drawer(&mut self, trigger: CloseTrigger) {
        self.drawer.close_on(trigger);
    }

    /// Check if the drawer is open.
    pub fn drawer_is_open(&self) -> bool {
        self.drawer.is_open()
    }

    // ---- catalog ---------------------------------------------------------

    /// Fetch a product snapshot from the catalog service, for the
    /// add-to-cart flow.
    pub async fn fetch_product(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductSnapshot, SessionError> {
        let api = self.api.clone().ok_or(SessionError::NotConfigured)?;
        Ok(api.fetch_product(product_id).await?)
    }

    // ---- checkout --------------------------------------------------------

    /// Submit the selected subset as an order.
    ///
    /// On success the purchased lines leave the cart, the voucher is
    /// consumed, and the drawer closes. Unselected lines stay for later.
    pub async fn submit_order(
        &mut self,
        shipping_address: Address,
        payment_method_id: PaymentMethodId,
    ) -> Result<Order, SessionError> {
        let orders = self.orders.clone().ok_or(SessionError::NotConfigured)?;
        let AuthState::Authenticated { customer_id } = &self.auth else {
            return Err(SessionError::NotAuthenticated);
        };

        let request = OrderRequest::from_selected(
            &self.cart,
            customer_id.clone(),
            shipping_address,
            payment_method_id,
            self.voucher.as_ref(),
        )?;

        let order = orders.submit(&request).await?;

        self.writer.invalidate();
        self.cart.remove_selected();
        self.voucher = None;
        self.drawer.close_on(CloseTrigger::CheckoutStarted);
        self.persist().await;

        Ok(order)
    }

    // ---- persistence -----------------------------------------------------

    /// Mirror to the local store and, when server-backed, schedule a
    /// debounced remote write. Failures are logged, never surfaced.
    async fn persist(&mut self) {
        if let Err(e) = self.local.save(&self.cart.items).await {
            warn!(error = %e, "local cart mirror failed");
        }
        if let Some(remote) = &self.remote {
            self.writer.schedule(Arc::clone(remote), self.cart.items.clone());
        }
    }
}

/// Generate a guest session identifier.
fn generate_session_id() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 18] = rand::thread_rng().gen();
    format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_format() {
        let id = generate_session_id();
        assert!(id.starts_with("sess_"));
        assert_ne!(id, generate_session_id());
    }
}

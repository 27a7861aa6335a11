//! Cart session facade for the GearCart storefront.
//!
//! [`CartSession`] is the one place cart state is mutated. It routes
//! persistence by auth state (local JSON for guests, the cart service for
//! authenticated customers), mirrors every mutation locally, debounces
//! server writes behind a monotonic write-sequence token, and hands the
//! selected subset off to the order service at checkout.
//!
//! # Example
//!
//! ```rust,no_run
//! use gear_session::{CartSession, SessionConfig};
//!
//! # async fn run() -> Result<(), gear_session::SessionError> {
//! let config = SessionConfig::load("gearcart.toml")?;
//! let mut session = CartSession::from_config(&config)?;
//! session.load().await;
//!
//! # Ok(())
//! # }
//! ```

mod config;
mod session;
mod writer;

pub use config::{ApiConfig, ConfigError, PricingConfig, SessionConfig, StorageConfig, SyncConfig};
pub use session::{AuthState, CartSession, SessionError};
pub use writer::DebouncedWriter;

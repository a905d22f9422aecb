//! # Zehnly Client
//!
//! Session-aware HTTP gateway for the Zehnly admin API.
//!
//! Every request goes to one base origin with a fixed 10-second timeout
//! and a shared cookie jar; every response passes a guard that clears the
//! shared [`SessionStore`](zehnly_session::SessionStore) on HTTP 401
//! before the error reaches the caller. On top of the gateway sit typed
//! clients for the console's endpoints: auth, coupons, popups and
//! analytics.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zehnly_client::{ApiGateway, GatewayConfig};
//! use zehnly_session::{MemoryCredentialStore, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStore::load(Arc::new(MemoryCredentialStore::new())).await);
//! let gateway = ApiGateway::new(GatewayConfig::default(), session)?;
//!
//! let popups = gateway.popups().list().await?;
//! println!("{} popups", popups.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod middleware;

pub use api::{
    AnalyticsApi, AuthApi, CouponsApi, CreateCouponRequest, CreatePopupRequest, LoginRequest,
    LoginResponse, NewUsersRange, OrdersParams, OrdersReport, PopupsApi, PremiumUsersRange,
    RangeParams, UpdateCouponRequest, UpdatePopupRequest,
};
pub use config::{GatewayConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, Result};
pub use gateway::ApiGateway;
pub use middleware::SessionGuard;

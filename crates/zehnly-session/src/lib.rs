//! # Zehnly Session
//!
//! Login session state for the admin console, mirrored to a small
//! key-value credential store between runs.
//!
//! The server keeps the real session in HTTP-only cookies; what lives here
//! is the console's own view of it: the signed-in admin user and an
//! authenticated flag. The two are persisted as separate entries so a
//! damaged user record degrades to a signed-out session instead of a
//! half-authenticated one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zehnly_core::AdminUser;
//! use zehnly_session::{FileCredentialStore, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(FileCredentialStore::open_default().await?);
//!     let session = SessionStore::load(credentials).await;
//!
//!     session.login(AdminUser::new(1, "admin@zehnly.ai", "admin")).await?;
//!
//!     let mut changes = session.subscribe();
//!     assert!(session.is_authenticated());
//!
//!     session.logout().await;
//!     changes.changed().await?;
//!     assert!(!changes.borrow().is_authenticated);
//!     Ok(())
//! }
//! ```

pub mod credentials;
pub mod error;
pub mod store;
pub mod types;

pub use credentials::{
    default_credentials_path, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
pub use error::{SessionError, SessionResult};
pub use store::{SessionStore, IS_AUTHENTICATED_KEY, USER_DATA_KEY};
pub use types::Session;

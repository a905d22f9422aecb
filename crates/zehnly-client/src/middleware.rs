//! Response interceptor keeping the session flag authoritative.

use async_trait::async_trait;
use http::Extensions;
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next};
use std::sync::Arc;
use tracing::warn;
use zehnly_session::SessionStore;

/// Middleware that clears the shared session on any 401 response.
///
/// Requests pass through untouched (the session rides in cookies, there
/// is no token to inject). On the way back, a 401 means the server no
/// longer honors our cookies, so the local session is invalidated before
/// the response reaches the caller; the caller still sees the original
/// error. Every other response and all transport errors pass through
/// unchanged.
pub struct SessionGuard {
    session: Arc<SessionStore>,
}

impl SessionGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Middleware for SessionGuard {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let result = next.run(req, extensions).await;

        if let Ok(response) = &result {
            if response.status() == StatusCode::UNAUTHORIZED && self.session.logout().await {
                warn!("received 401, session invalidated");
            }
        }

        result
    }
}

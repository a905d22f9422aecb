//! Authentication endpoints.
//!
//! The server keeps the session in HTTP-only cookies, so a successful
//! login here only yields a message; it is the caller's job to write the
//! session store afterwards.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::gateway::ApiGateway;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub captcha_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
}

/// Known login error codes: `INCORRECT_PASSWORD`, `USER_NOT_FOUND`,
/// `CAPTCHA_TOKEN_NOT_EXIST`, `INVALID_EMAIL`, `USER_BLOCKED`. Surfaced
/// verbatim through [`ApiError::code`](crate::error::ApiError::code).
pub struct AuthApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    /// Log in with email and password; cookies arrive via the jar
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        self.gateway.post("/v1/users/login", credentials).await
    }

    /// Log out: best-effort server call, unconditional local clear.
    ///
    /// A failed remote call is logged and swallowed; the local session
    /// must end regardless of network state.
    pub async fn logout(&self) {
        if let Err(e) = self.gateway.post_unit("/v1/users/logout").await {
            warn!("remote logout failed: {e}");
        }
        self.gateway.session().logout().await;
    }

    /// Probe whether the server still honors our cookies
    pub async fn check_auth(&self) -> bool {
        self.gateway
            .get::<serde_json::Value>("/v1/users/me")
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::error::ApiError;
    use mockito::Matcher;
    use std::sync::Arc;
    use zehnly_core::AdminUser;
    use zehnly_session::{MemoryCredentialStore, SessionStore};

    async fn gateway_for(server: &mockito::Server) -> ApiGateway {
        let session =
            Arc::new(SessionStore::load(Arc::new(MemoryCredentialStore::new())).await);
        ApiGateway::new(GatewayConfig::new(server.url()), session).unwrap()
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/users/login")
            .match_body(Matcher::Json(serde_json::json!({
                "email": "admin@zehnly.ai",
                "password": "hunter2",
                "captchaToken": "tok-123",
            })))
            .with_status(200)
            .with_body(r#"{"message": "ok"}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let response = gateway
            .auth()
            .login(&LoginRequest {
                email: "admin@zehnly.ai".to_string(),
                password: "hunter2".to_string(),
                captcha_token: "tok-123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.message, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_surfaces_error_code() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/users/login")
            .with_status(401)
            .with_body(r#"{"error":{"code":"INCORRECT_PASSWORD"}}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let err = gateway
            .auth()
            .login(&LoginRequest {
                email: "admin@zehnly.ai".to_string(),
                password: "wrong".to_string(),
                captcha_token: "tok-123".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.code(), Some("INCORRECT_PASSWORD"));
    }

    #[tokio::test]
    async fn test_logout_clears_session_when_remote_call_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/users/logout")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        gateway
            .session()
            .login(AdminUser::new(1, "admin@zehnly.ai", "admin"))
            .await
            .unwrap();

        gateway.auth().logout().await;

        assert!(!gateway.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_check_auth() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/v1/users/me")
            .with_status(200)
            .with_body(r#"{"id": 1, "email": "admin@zehnly.ai", "role": "admin"}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        assert!(gateway.auth().check_auth().await);
        ok.remove_async().await;

        server
            .mock("GET", "/v1/users/me")
            .with_status(401)
            .create_async()
            .await;
        assert!(!gateway.auth().check_auth().await);
    }
}

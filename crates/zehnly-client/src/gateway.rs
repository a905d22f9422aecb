//! The session-aware API gateway.
//!
//! One `reqwest` client behind a single middleware: every request goes to
//! the fixed base origin with the configured timeout and the shared cookie
//! jar, and every response passes the [`SessionGuard`](crate::middleware::SessionGuard)
//! on the way back. No retries anywhere; errors reach the caller on the
//! first attempt.

use reqwest::{header, multipart::Form};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use zehnly_session::SessionStore;

use crate::api::{AnalyticsApi, AuthApi, CouponsApi, PopupsApi};
use crate::config::GatewayConfig;
use crate::error::{ApiError, Result};
use crate::middleware::SessionGuard;

pub struct ApiGateway {
    http: ClientWithMiddleware,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiGateway {
    /// Build the gateway around a shared session store.
    ///
    /// The cookie jar is enabled so the server's HTTP-only session cookies
    /// are stored and replayed automatically; outgoing requests carry no
    /// auth header.
    pub fn new(config: GatewayConfig, session: Arc<SessionStore>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .cookie_store(true)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let http = ClientBuilder::new(client)
            .with(SessionGuard::new(session.clone()))
            .build();

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session store this gateway keeps authoritative
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authentication endpoints
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Coupon management endpoints
    pub fn coupons(&self) -> CouponsApi<'_> {
        CouponsApi::new(self)
    }

    /// Popup management endpoints
    pub fn popups(&self) -> PopupsApi<'_> {
        PopupsApi::new(self)
    }

    /// Analytics and payments endpoints
    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.http.get(self.url(path))).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.http.get(self.url(path)).query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.post(self.url(path)).json(body))
            .await
    }

    /// POST with no body, discarding any response body
    pub async fn post_unit(&self, path: &str) -> Result<()> {
        let request = self.http.post(self.url(path));
        self.check(request).await.map(|_| ())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.http.delete(self.url(path))).await
    }

    /// POST a multipart form (file uploads); the multipart content type
    /// and boundary replace the JSON default
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        self.execute(self.http.post(self.url(path)).multipart(form))
            .await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.check(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and map non-success statuses into the error taxonomy
    async fn check(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(%status, url = %response.url(), "response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(response)
    }
}

//! Typed clients for the admin API, one module per console page.

pub mod analytics;
pub mod auth;
pub mod coupons;
pub mod popups;

pub use analytics::{AnalyticsApi, NewUsersRange, OrdersParams, OrdersReport, PremiumUsersRange, RangeParams};
pub use auth::{AuthApi, LoginRequest, LoginResponse};
pub use coupons::{CouponsApi, CreateCouponRequest, UpdateCouponRequest};
pub use popups::{CreatePopupRequest, PopupsApi, UpdatePopupRequest};

use serde::Deserialize;

/// `{ "data": [...] }` list envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub data: Vec<T>,
}

/// `{ "message": ..., "data": ... }` item envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    pub message: Option<String>,
    pub data: T,
}

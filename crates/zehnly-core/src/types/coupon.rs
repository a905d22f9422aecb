use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a commission or discount value is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    Fixed,
    Percentage,
}

impl std::fmt::Display for RateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateKind::Fixed => write!(f, "fixed"),
            RateKind::Percentage => write!(f, "percentage"),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid rate kind: {0} (expected \"fixed\" or \"percentage\")")]
pub struct ParseRateKindError(String);

impl std::str::FromStr for RateKind {
    type Err = ParseRateKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(RateKind::Fixed),
            "percentage" => Ok(RateKind::Percentage),
            other => Err(ParseRateKindError(other.to_string())),
        }
    }
}

/// A commission or discount attached to a coupon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: RateKind,
}

/// The user a coupon belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// A subscription plan a coupon can apply to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    pub user_commission: Rate,
    pub user_discount: Rate,
    pub user: CouponUser,
    pub applicable_subscriptions: Vec<Subscription>,
    pub expiration_date: DateTime<Utc>,
    pub is_active: bool,
    pub max_usage: u32,
    pub usage_count: u32,
}

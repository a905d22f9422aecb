use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payment order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Canceled,
    Timeout,
    Expired,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Paid => write!(f, "PAID"),
            OrderStatus::Canceled => write!(f, "CANCELED"),
            OrderStatus::Timeout => write!(f, "TIMEOUT"),
            OrderStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid order status: {0}")]
pub struct ParseOrderStatusError(String);

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PAID" => Ok(OrderStatus::Paid),
            "CANCELED" => Ok(OrderStatus::Canceled),
            "TIMEOUT" => Ok(OrderStatus::Timeout),
            "EXPIRED" => Ok(OrderStatus::Expired),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// A payment order as returned by the comprehensive orders endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub paid_amount: f64,
    pub status: OrderStatus,
    /// Payment provider identifier, e.g. "PAYME" or "CLICK". Left as a
    /// string because new providers show up without notice.
    pub provider: String,
    #[serde(default)]
    pub promo_code: Option<String>,
    pub discount_amount: f64,
    #[serde(default)]
    pub discount_type: Option<String>,
    pub subscription: String,
    #[serde(default)]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
    pub display_name: String,
    pub has_promo: bool,
    pub days_since_order: i64,
}

/// Aggregates computed server-side over the filtered order set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersSummary {
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub conversion_rate: f64,
    pub status_breakdown: HashMap<String, u64>,
    pub provider_breakdown: HashMap<String, u64>,
}

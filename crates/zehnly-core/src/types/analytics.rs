use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily activity snapshot for the overview page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub dau: u64,
    pub wau: u64,
    pub mau: u64,
    pub premium_users: u64,
    pub daily_new_premium_users: u64,
    pub daily_new_users: u64,
    pub date: NaiveDate,
}

/// A user that started a premium subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumUser {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
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
    pub subscription_start_date: DateTime<Utc>,
}

/// New premium signups grouped by day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPremiumUsers {
    pub date: NaiveDate,
    pub count: u64,
    pub users: Vec<PremiumUser>,
}

/// A freshly registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
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
    pub registration_date: DateTime<Utc>,
}

/// Registrations grouped by day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNewUsers {
    pub date: NaiveDate,
    pub count: u64,
    pub users: Vec<NewUser>,
}

/// Offset pagination block used by the range endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangePagination {
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_decode() {
        let body = r#"{
            "dau": 1200,
            "wau": 5400,
            "mau": 16000,
            "premiumUsers": 830,
            "dailyNewPremiumUsers": 12,
            "dailyNewUsers": 140,
            "date": "2026-08-01"
        }"#;
        let overview: AnalyticsOverview = serde_json::from_str(body).unwrap();
        assert_eq!(overview.dau, 1200);
        assert_eq!(overview.date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    }

    #[test]
    fn test_premium_user_sparse_fields() {
        let body = r#"{
            "userId": "u-9",
            "subscriptionStartDate": "2026-07-15T08:30:00Z"
        }"#;
        let user: PremiumUser = serde_json::from_str(body).unwrap();
        assert_eq!(user.user_id, "u-9");
        assert!(user.full_name.is_none());
    }
}

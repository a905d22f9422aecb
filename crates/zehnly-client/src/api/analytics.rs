//! Analytics, user-growth and payment-order endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use zehnly_core::{
    AnalyticsOverview, DailyNewUsers, DailyPremiumUsers, Order, OrderStatus, OrdersSummary,
    RangePagination,
};

use super::ItemEnvelope;
use crate::error::Result;
use crate::gateway::ApiGateway;

/// Date-range query for the growth endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
}

impl RangeParams {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            limit: None,
            skip: None,
        }
    }
}

/// Filters for the comprehensive orders endpoint; unset fields are
/// omitted from the query string
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PremiumUsersRange {
    pub results: Vec<DailyPremiumUsers>,
    #[serde(default)]
    pub pagination: Option<RangePagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUsersRange {
    pub results: Vec<DailyNewUsers>,
    #[serde(default)]
    pub pagination: Option<RangePagination>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersPagination {
    pub limit: u64,
    pub skip: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersReport {
    pub orders: Vec<Order>,
    pub total: u64,
    pub pagination: OrdersPagination,
    pub summary: OrdersSummary,
}

pub struct AnalyticsApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> AnalyticsApi<'a> {
    pub(crate) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    /// Activity snapshot for one day
    pub async fn overview(&self, date: NaiveDate) -> Result<AnalyticsOverview> {
        let response: ItemEnvelope<AnalyticsOverview> = self
            .gateway
            .get_with_query("/v1/analytics/overview", &[("date", date.to_string())])
            .await?;
        Ok(response.data)
    }

    /// New premium subscribers per day over a range
    pub async fn new_premium_users_range(&self, params: &RangeParams) -> Result<PremiumUsersRange> {
        let response: ItemEnvelope<PremiumUsersRange> = self
            .gateway
            .get_with_query("/v1/analytics/new-premium-users-range", params)
            .await?;
        Ok(response.data)
    }

    /// New premium subscribers for one day
    pub async fn new_premium_users_by_date(&self, date: NaiveDate) -> Result<DailyPremiumUsers> {
        let response: ItemEnvelope<DailyPremiumUsers> = self
            .gateway
            .get_with_query(
                "/v1/analytics/new-premium-users",
                &[("date", date.to_string())],
            )
            .await?;
        Ok(response.data)
    }

    /// New registrations per day over a range
    pub async fn new_users_range(&self, params: &RangeParams) -> Result<NewUsersRange> {
        let response: ItemEnvelope<NewUsersRange> = self
            .gateway
            .get_with_query("/v1/analytics/new-users-range", params)
            .await?;
        Ok(response.data)
    }

    /// Filtered order list with server-side aggregates
    pub async fn orders(&self, params: &OrdersParams) -> Result<OrdersReport> {
        let response: ItemEnvelope<OrdersReport> = self
            .gateway
            .get_with_query("/v1/analytics/orders/comprehensive", params)
            .await?;
        Ok(response.data)
    }
}

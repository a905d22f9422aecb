//! Coupon management endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use zehnly_core::{Coupon, RateKind};

use super::{ItemEnvelope, ListEnvelope};
use crate::error::Result;
use crate::gateway::ApiGateway;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub code: String,
    pub user_commission_value: f64,
    pub user_commission_type: RateKind,
    pub user_discount_value: f64,
    pub user_discount_type: RateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_subscriptions: Option<Vec<String>>,
    pub expiration_date: DateTime<Utc>,
    pub is_active: bool,
    pub max_usage: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouponRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_commission_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_commission_type: Option<RateKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_discount_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_discount_type: Option<RateKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_subscriptions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_usage: Option<u32>,
}

pub struct CouponsApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> CouponsApi<'a> {
    pub(crate) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Coupon>> {
        let response: ListEnvelope<Coupon> = self.gateway.get("/coupons").await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str) -> Result<Coupon> {
        let response: ItemEnvelope<Coupon> =
            self.gateway.get(&format!("/coupons/{id}")).await?;
        Ok(response.data)
    }

    pub async fn create(&self, request: &CreateCouponRequest) -> Result<Coupon> {
        let response: ItemEnvelope<Coupon> = self.gateway.post("/coupons", request).await?;
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, request: &UpdateCouponRequest) -> Result<Coupon> {
        let response: ItemEnvelope<Coupon> = self
            .gateway
            .put(&format!("/coupons/{id}"), request)
            .await?;
        Ok(response.data)
    }

    /// Delete a coupon; the server echoes the removed record
    pub async fn delete(&self, id: &str) -> Result<Coupon> {
        let response: ItemEnvelope<Coupon> =
            self.gateway.delete(&format!("/coupons/{id}")).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use mockito::Matcher;
    use std::sync::Arc;
    use zehnly_session::{MemoryCredentialStore, SessionStore};

    const COUPON_BODY: &str = r#"{
        "_id": "c1",
        "code": "WELCOME10",
        "userCommission": {"value": 5, "type": "fixed"},
        "userDiscount": {"value": 10, "type": "percentage"},
        "user": {
            "_id": "u1",
            "fullName": "Ada Lovelace",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "+998901234567"
        },
        "applicableSubscriptions": [],
        "expirationDate": "2026-12-31T00:00:00Z",
        "isActive": true,
        "maxUsage": 100,
        "usageCount": 3
    }"#;

    async fn gateway_for(server: &mockito::Server) -> ApiGateway {
        let session =
            Arc::new(SessionStore::load(Arc::new(MemoryCredentialStore::new())).await);
        ApiGateway::new(GatewayConfig::new(server.url()), session).unwrap()
    }

    #[tokio::test]
    async fn test_list_unwraps_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/coupons")
            .with_status(200)
            .with_body(format!(r#"{{"data": [{COUPON_BODY}]}}"#))
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let coupons = gateway.coupons().list().await.unwrap();
        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0].code, "WELCOME10");
    }

    #[tokio::test]
    async fn test_create_serializes_flat_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/coupons")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "code": "SPRING",
                "userCommissionType": "fixed",
                "userDiscountType": "percentage",
                "maxUsage": 50,
            })))
            .with_status(200)
            .with_body(format!(r#"{{"message": "created", "data": {COUPON_BODY}}}"#))
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let request = CreateCouponRequest {
            code: "SPRING".to_string(),
            user_commission_value: 5.0,
            user_commission_type: RateKind::Fixed,
            user_discount_value: 10.0,
            user_discount_type: RateKind::Percentage,
            applicable_subscriptions: None,
            expiration_date: "2026-12-31T00:00:00Z".parse().unwrap(),
            is_active: true,
            max_usage: 50,
        };
        gateway.coupons().create(&request).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_omits_unset_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/coupons/c1")
            .match_body(Matcher::Json(serde_json::json!({"isActive": false})))
            .with_status(200)
            .with_body(format!(r#"{{"message": "updated", "data": {COUPON_BODY}}}"#))
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let request = UpdateCouponRequest {
            is_active: Some(false),
            ..Default::default()
        };
        gateway.coupons().update("c1", &request).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_returns_removed_coupon() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/coupons/c1")
            .with_status(200)
            .with_body(format!(r#"{{"message": "deleted", "data": {COUPON_BODY}}}"#))
            .create_async()
            .await;

        let gateway = gateway_for(&server).await;
        let coupon = gateway.coupons().delete("c1").await.unwrap();
        assert_eq!(coupon.id, "c1");
    }
}

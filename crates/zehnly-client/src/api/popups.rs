//! Popup management endpoints, including the temp-storage image upload.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use zehnly_core::Popup;

use super::{ItemEnvelope, ListEnvelope};
use crate::error::Result;
use crate::gateway::ApiGateway;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePopupRequest {
    pub title: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePopupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    url: String,
}

pub struct PopupsApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> PopupsApi<'a> {
    pub(crate) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Popup>> {
        let response: ListEnvelope<Popup> = self.gateway.get("/v1/popups").await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str) -> Result<Popup> {
        let response: ItemEnvelope<Popup> =
            self.gateway.get(&format!("/v1/popups/{id}")).await?;
        Ok(response.data)
    }

    pub async fn create(&self, request: &CreatePopupRequest) -> Result<Popup> {
        let response: ItemEnvelope<Popup> = self.gateway.post("/v1/popups", request).await?;
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, request: &UpdatePopupRequest) -> Result<Popup> {
        let response: ItemEnvelope<Popup> = self
            .gateway
            .put(&format!("/v1/popups/{id}"), request)
            .await?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: serde_json::Value = self.gateway.delete(&format!("/v1/popups/{id}")).await?;
        Ok(())
    }

    /// Upload an image to temp storage; returns the hosted URL to put in
    /// a popup's `image_url`
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let response: ItemEnvelope<UploadedFile> = self
            .gateway
            .post_multipart("/v1/file-upload/temp", form)
            .await?;
        Ok(response.data.url)
    }
}

//! Message delivery collaborator and its EmailJS implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::protocol::{DeliveryAuth, EmailJsSendRequest, TemplateParams};
use thiserror::Error;
use tracing::debug;

pub const EMAILJS_API_URL: &str = "https://api.emailjs.com";
const EMAILJS_SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("delivery transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("delivery service panicked: {0}")]
    Panicked(String),
    #[error("delivery attempt abandoned before completion")]
    Abandoned,
}

#[async_trait]
pub trait DeliveryService: Send + Sync {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        auth: &DeliveryAuth,
    ) -> Result<(), DeliveryError>;
}

#[derive(Clone)]
pub struct EmailJsClient {
    http: Client,
    api_url: String,
}

impl EmailJsClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, api_url))
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn send_url(&self) -> String {
        format!("{}{EMAILJS_SEND_PATH}", self.api_url)
    }
}

#[async_trait]
impl DeliveryService for EmailJsClient {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        auth: &DeliveryAuth,
    ) -> Result<(), DeliveryError> {
        let body = EmailJsSendRequest {
            service_id: service_id.to_string(),
            template_id: template_id.to_string(),
            user_id: auth.public_key.clone(),
            template_params: params.clone(),
        };

        let response = self.http.post(self.send_url()).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(%status, "emailjs accepted message");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected { status, body })
    }
}

#[cfg(test)]
#[path = "tests/delivery_tests.rs"]
mod tests;

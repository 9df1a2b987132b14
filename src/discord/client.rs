//! Outbound webhook delivery.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::core::config::AppConfig;
use crate::errors::NotifierError;

/// Status and body of a webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    /// Discord answers 204 No Content for most webhook posts, 200 with `?wait=true`.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, 200 | 204)
    }

    /// Body reported to the invoker when delivery was not accepted.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        match StatusCode::from_u16(self.status) {
            Ok(code) if code.is_client_error() || code.is_server_error() => code
                .canonical_reason()
                .map_or_else(|| format!("Discord status {}", self.status), str::to_string),
            _ => format!("Discord status {}", self.status),
        }
    }
}

/// Posts a JSON document to a webhook.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post_json(&self, url: &Url, body: String) -> Result<WebhookResponse, NotifierError>;
}

/// `reqwest`-backed transport. Build once and reuse across invocations.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: HttpClient,
    user_agent: Option<HeaderValue>,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        let user_agent = config
            .user_agent
            .as_deref()
            .and_then(|ua| HeaderValue::from_str(ua).ok());
        Self { client, user_agent }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(ua) = &self.user_agent {
            headers.insert(USER_AGENT, ua.clone());
        }
        headers
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post_json(&self, url: &Url, body: String) -> Result<WebhookResponse, NotifierError> {
        let resp = self
            .client
            .post(url.clone())
            .headers(self.headers())
            .body(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        debug!(status, body_len = body.len(), "Webhook responded");
        Ok(WebhookResponse { status, body })
    }
}

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::{InboundEvent, InvocationResult, SnsRecord};
use crate::discord::client::{ReqwestTransport, WebhookTransport};
use crate::discord::message_builder::{build_discord_message, truncate_chars};
use crate::errors::NotifierError;

use super::SUCCESS_BODY;

const LOG_PREVIEW_CHARS: usize = 500;

/// Forwards SNS notifications to a Discord webhook.
pub struct Notifier<T = ReqwestTransport> {
    config: AppConfig,
    transport: T,
}

impl Notifier<ReqwestTransport> {
    #[must_use]
    pub fn from_config(config: AppConfig) -> Self {
        let transport = ReqwestTransport::new(&config);
        Self::new(config, transport)
    }
}

impl<T: WebhookTransport> Notifier<T> {
    pub fn new(config: AppConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Processes one invocation. Every outcome, including failures, is
    /// reported through the returned status code.
    pub async fn handle(&self, payload: &Value) -> InvocationResult {
        info!(webhook_configured = self.config.has_webhook(), "Notifier invoked");
        match self.forward(payload).await {
            Ok(status) => {
                info!(status, "Delivered SNS message(s) to Discord");
                InvocationResult::new(status, SUCCESS_BODY)
            }
            Err(e) => {
                match &e {
                    NotifierError::MissingWebhookUrl => {
                        error!("Discord webhook URL is not configured");
                    }
                    NotifierError::InvalidEvent(detail) => {
                        error!(
                            detail = %detail,
                            event = %truncate_chars(&payload.to_string(), LOG_PREVIEW_CHARS),
                            "Rejected SNS event"
                        );
                    }
                    NotifierError::RemoteStatus { status, reason } => {
                        error!(status, reason = %reason, "Discord rejected the message");
                    }
                    other => error!(error = %other, "Failed to forward SNS message"),
                }
                InvocationResult::from(&e)
            }
        }
    }

    async fn forward(&self, payload: &Value) -> Result<u16, NotifierError> {
        let webhook_url = self
            .config
            .webhook_url
            .as_deref()
            .ok_or(NotifierError::MissingWebhookUrl)?;

        let event = InboundEvent::from_value(payload)?;
        info!(record_count = event.records.len(), "Incoming SNS records");

        let url = Url::parse(webhook_url)?;

        let mut last_status = 200;
        for (idx, record) in event.records.iter().enumerate() {
            last_status = self.forward_record(&url, idx, record).await?;
        }
        Ok(last_status)
    }

    async fn forward_record(
        &self,
        url: &Url,
        idx: usize,
        record: &SnsRecord,
    ) -> Result<u16, NotifierError> {
        let raw_message = record.sns.message();
        info!(
            record = idx,
            message_id = record.sns.message_id.as_deref().unwrap_or(""),
            topic_arn = record.sns.topic_arn.as_deref().unwrap_or(""),
            raw_message = %truncate_chars(raw_message, LOG_PREVIEW_CHARS),
            "Processing SNS record"
        );

        let message = build_discord_message(raw_message, &self.config.default_region);
        if !message.is_embed() {
            warn!(record = idx, "SNS message is not a CloudWatch alarm, forwarding as text");
        }

        let body = serde_json::to_string(&message)?;
        let response = self.transport.post_json(url, body).await?;

        if response.is_delivered() {
            info!(record = idx, status = response.status, "Discord accepted message");
            Ok(response.status)
        } else {
            Err(NotifierError::RemoteStatus {
                status: response.status,
                reason: response.failure_reason(),
            })
        }
    }
}

/// Lambda handler. Never fails the invocation; errors are mapped to status codes.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %event.context.request_id))]
pub async fn function_handler<T: WebhookTransport>(
    notifier: &Notifier<T>,
    event: LambdaEvent<Value>,
) -> Result<InvocationResult, Error> {
    Ok(notifier.handle(&event.payload).await)
}

pub use self::function_handler as handler;

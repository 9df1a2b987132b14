use thiserror::Error;

/// Body returned when the webhook URL is not configured.
pub const CONFIG_ERROR_BODY: &str = "환경 변수 오류";

/// Body returned when the inbound event has no usable SNS records.
pub const INVALID_EVENT_BODY: &str = "잘못된 이벤트 형식";

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Discord webhook URL is not configured")]
    MissingWebhookUrl,

    #[error("Invalid SNS event: {0}")]
    InvalidEvent(String),

    #[error("Invalid webhook URL: {0}")]
    InvalidWebhookUrl(#[from] url::ParseError),

    #[error("Discord responded with status {status}: {reason}")]
    RemoteStatus { status: u16, reason: String },

    #[error("Failed to send HTTP request: {0}")]
    Network(String),

    #[error("Failed to serialize Discord payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for NotifierError {
    /// The request URL carries the webhook token, so it is stripped. The
    /// source chain is kept so the root cause (refused, DNS, timeout) survives.
    fn from(error: reqwest::Error) -> Self {
        let error = error.without_url();
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        NotifierError::Network(message)
    }
}

impl NotifierError {
    /// Status code reported back to the invoker for this failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            NotifierError::InvalidEvent(_) => 400,
            NotifierError::RemoteStatus { status, .. } => *status,
            NotifierError::MissingWebhookUrl
            | NotifierError::InvalidWebhookUrl(_)
            | NotifierError::Network(_)
            | NotifierError::Serialization(_) => 500,
        }
    }

    /// Body reported back to the invoker for this failure.
    #[must_use]
    pub fn response_body(&self) -> String {
        match self {
            NotifierError::MissingWebhookUrl => CONFIG_ERROR_BODY.to_string(),
            NotifierError::InvalidEvent(_) => INVALID_EVENT_BODY.to_string(),
            NotifierError::RemoteStatus { reason, .. } => reason.clone(),
            NotifierError::InvalidWebhookUrl(e) => e.to_string(),
            NotifierError::Network(msg) => msg.clone(),
            NotifierError::Serialization(e) => e.to_string(),
        }
    }
}

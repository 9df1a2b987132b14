use aws_config::meta::region::RegionProviderChain;
use std::env;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Process-wide settings, read once at cold start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub webhook_url: Option<String>,
    pub default_region: String,
    pub user_agent: Option<String>,
    pub request_timeout: Duration,
}

impl AppConfig {
    #[must_use]
    pub fn new(webhook_url: Option<String>, default_region: impl Into<String>) -> Self {
        Self {
            webhook_url: non_blank(webhook_url),
            default_region: default_region.into(),
            user_agent: None,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = non_blank(Some(user_agent.into()));
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Loads settings from the environment.
    ///
    /// A missing `DISCORD_WEBHOOK_URL` is not an error here; the handler
    /// reports it per invocation without attempting network I/O.
    pub async fn from_env() -> Self {
        let region = RegionProviderChain::default_provider()
            .or_else(DEFAULT_REGION)
            .region()
            .await
            .map_or_else(|| DEFAULT_REGION.to_string(), |r| r.to_string());

        let request_timeout = env::var("WEBHOOK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Self {
            webhook_url: non_blank(env::var("DISCORD_WEBHOOK_URL").ok()),
            default_region: region,
            user_agent: non_blank(env::var("DISCORD_USER_AGENT").ok()),
            request_timeout,
        }
    }

    #[must_use]
    pub fn has_webhook(&self) -> bool {
        self.webhook_url.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

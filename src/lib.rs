/// SNS → Discord notifier - forwards CloudWatch alarms to a Discord webhook.
///
/// The crate backs a single AWS Lambda function subscribed to an SNS topic.
/// Each invocation carries one or more SNS records. Alarm-shaped messages are
/// rendered as a Discord embed that links to the alarm in the CloudWatch
/// console; any other message is forwarded as plain text.
///
/// # Architecture
///
/// - `core` holds the configuration (read once at cold start) and event types
/// - `discord` builds webhook payloads and posts them with `reqwest`
/// - `notifier` ties both together and exposes the Lambda handler
///
/// # Example
///
/// ```no_run
/// use sns_discord::core::config::AppConfig;
/// use sns_discord::notifier::Notifier;
///
/// #[tokio::main]
/// async fn main() {
///     sns_discord::setup_logging();
///
///     let config = AppConfig::new(
///         Some("https://discord.com/api/webhooks/123/abc".to_string()),
///         "ap-northeast-2",
///     );
///     let notifier = Notifier::from_config(config);
///
///     let event = serde_json::json!({
///         "Records": [{ "Sns": { "Message": "deploy finished" } }]
///     });
///     let result = notifier.handle(&event).await;
///     println!("{} {}", result.status_code, result.body);
/// }
/// ```
pub mod core;
pub mod discord;
pub mod errors;
pub mod notifier;

pub use errors::NotifierError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output is JSON lines for `CloudWatch` Logs. The level comes from `RUST_LOG`
/// and defaults to `info` (`debug` when built with the `debug-logs` feature).
/// Calling this more than once is harmless.
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let default_level = if cfg!(feature = "debug-logs") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

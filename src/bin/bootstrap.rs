// Lambda bootstrap entry point for the notifier function

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use sns_discord::core::config::AppConfig;
use sns_discord::notifier::{Notifier, handler};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    sns_discord::setup_logging();

    let config = AppConfig::from_env().await;
    info!(
        webhook_configured = config.has_webhook(),
        default_region = %config.default_region,
        "Loaded notifier configuration"
    );

    let notifier = Notifier::from_config(config);
    let notifier = &notifier;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(notifier, event).await
    }))
    .await
}

use anyhow::Context as _;
use settings::Settings;

use crate::adapter::alexa::AlexaRequestVerifier;
use crate::adapter::slack::SlackWebhook;
use crate::core::{IntentDispatcher, StatusNotifier};

mod adapter;
mod core;
mod settings;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    //.env is optional, real environment variables take precedence
    dotenvy::dotenv().ok();

    let settings = Settings::new().context("Error reading configuration")?;
    settings.monitoring.init().context("Error initializing monitoring")?;

    let webhook = SlackWebhook::new(&settings.slack_webhook).context("Error creating Slack webhook client")?;
    let dispatcher = IntentDispatcher::new(StatusNotifier::new(&settings.app_user, webhook));
    let verifier = AlexaRequestVerifier::new(&settings.alexa_application_id);

    tracing::info!("Announcing status changes of {}", settings.app_user);

    settings
        .http_server
        .run_server(
            move |cfg| {
                cfg.service(adapter::alexa::new_routes(verifier.clone(), dispatcher.clone()));
                adapter::web::new_root_routes(cfg);
            },
            adapter::web::new_error_handlers,
        )
        .await
}

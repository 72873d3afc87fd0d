use infrastructure::HttpClientConfig;
use reqwest_middleware::ClientWithMiddleware;

use crate::core::{ChatMessage, ChatSender, DeliveryError};

const USER_AGENT: &str = "OutOfOfficeBot";

/// Posts chat messages to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    client: ClientWithMiddleware,
    url: String,
}

impl SlackWebhook {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let client = HttpClientConfig::new(Some(USER_AGENT.to_owned())).new_tracing_client()?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

impl ChatSender for SlackWebhook {
    #[tracing::instrument(name = "send_slack_message", skip_all)]
    async fn send(&self, message: &ChatMessage) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport { reason: e.to_string() })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

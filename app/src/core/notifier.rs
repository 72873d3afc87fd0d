use derive_more::{Display, Error};
use infrastructure::meter;
use serde::Serialize;

use super::{AwayDuration, Status};

const BOT_USERNAME: &str = "OutOfOfficeBot";
const CHANNEL: &str = "back";

/// Payload of a chat webhook message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub username: String,
    pub channel: String,
}

impl ChatMessage {
    pub fn new(text: String) -> Self {
        Self {
            text,
            username: BOT_USERNAME.to_owned(),
            channel: CHANNEL.to_owned(),
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum DeliveryError {
    #[display("Error sending chat message: {reason}")]
    Transport { reason: String },

    #[display("Chat message rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub trait ChatSender {
    async fn send(&self, message: &ChatMessage) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct StatusNotifier<S> {
    user: String,
    sender: S,
}

impl<S: ChatSender> StatusNotifier<S> {
    pub fn new(user: &str, sender: S) -> Self {
        Self {
            user: user.to_owned(),
            sender,
        }
    }

    pub fn chat_message(&self, status: &Status, duration: Option<AwayDuration>) -> ChatMessage {
        ChatMessage::new(status.status_line(&self.user, duration))
    }

    /// Announces the status change. Delivery is fire-and-forget: failures are logged,
    /// never returned, and nothing is retried.
    #[tracing::instrument(skip(self))]
    pub async fn notify(&self, status: &Status, duration: Option<AwayDuration>) {
        let message = self.chat_message(status, duration);
        let status_code = status.to_string();

        match self.sender.send(&message).await {
            Ok(()) => {
                tracing::info!("Status change to {} announced", status_code);
                meter::increment("status_notification", &[("status", status_code.as_str()), ("result", "sent")]);
            }
            Err(e) => {
                tracing::warn!("Status change to {} not announced: {}", status_code, e);
                meter::increment("status_notification", &[("status", status_code.as_str()), ("result", "failed")]);
            }
        }
    }
}

mod dispatch;
mod duration;
mod intent;
mod notifier;
mod status;

pub use dispatch::{Card, DispatchError, IntentDispatcher, SpokenReply};
pub use duration::{AwayDuration, DurationParseError};
pub use intent::{Intent, Slots};
pub use notifier::{ChatMessage, ChatSender, DeliveryError, StatusNotifier};
pub use status::Status;

#[cfg(test)]
pub use notifier::test::RecordingSender;

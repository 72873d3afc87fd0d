use derive_more::{Display, Error};
use infrastructure::meter;

use super::{AwayDuration, ChatSender, DurationParseError, Intent, Slots, Status, StatusNotifier};

const CARD_TITLE: &str = "Out of Office App";
const DURATION_SLOT: &str = "duration";
const HELP_TEXT: &str = "You can ask me to tell you the current out of office status by saying current status. \
    You can update your stats by saying tell out of office i'll be right back, i've gone home, i'm busy, \
    i'm here or i'll be back in 10 minutes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub content: String,
}

/// What the voice assistant says and shows after an intent was handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpokenReply {
    pub speech: Option<String>,
    pub card: Option<Card>,
}

impl SpokenReply {
    pub fn empty() -> Self {
        Self::default()
    }

    fn speech(text: impl Into<String>) -> Self {
        Self {
            speech: Some(text.into()),
            card: None,
        }
    }

    fn with_card(mut self, content: impl Into<String>) -> Self {
        self.card = Some(Card {
            title: CARD_TITLE.to_owned(),
            content: content.into(),
        });
        self
    }
}

#[derive(Debug, Display, Error)]
pub enum DispatchError {
    #[display("Intent {intent} requires slot {slot}")]
    MissingSlot { intent: &'static str, slot: &'static str },

    #[display("Invalid duration slot: {_0}")]
    InvalidDuration(DurationParseError),
}

#[derive(Debug, Clone)]
pub struct IntentDispatcher<S> {
    notifier: StatusNotifier<S>,
}

impl<S: ChatSender> IntentDispatcher<S> {
    pub fn new(notifier: StatusNotifier<S>) -> Self {
        Self { notifier }
    }

    #[tracing::instrument(name = "dispatch_intent", skip(self, slots))]
    pub async fn dispatch(&self, intent_name: &str, slots: &Slots) -> Result<SpokenReply, DispatchError> {
        let intent = Intent::from(intent_name);

        let reply = match &intent {
            Intent::Here => self.update_status(Status::Here, "Here", "in the office").await,
            Intent::BeRightBack => self.update_status_to_code(Status::BeRightBack).await,
            Intent::GoneHome => self.update_status_to_code(Status::GoneHome).await,
            Intent::DoNotDisturb => self.update_status_to_code(Status::DoNotDisturb).await,
            Intent::Yaaaay => self.update_status_to_code(Status::Yaaaay).await,
            Intent::BackIn => self.back_in(slots).await?,
            Intent::Help => SpokenReply::speech(HELP_TEXT),
            Intent::Unrecognized(name) => {
                tracing::warn!("Ignoring unrecognized intent {}", name);
                SpokenReply::empty()
            }
        };

        tracing::info!("{} processed", intent.name());
        meter::increment("alexa_intent_processed", &[("intent", intent.metric_label())]);

        Ok(reply)
    }

    async fn update_status_to_code(&self, status: Status) -> SpokenReply {
        let code = status.to_string();
        self.update_status(status, &code, &code).await
    }

    //Reply is fixed before the notification goes out, delivery can't change it
    async fn update_status(&self, status: Status, spoken_name: &str, card_state: &str) -> SpokenReply {
        let reply = SpokenReply::speech(format!("I've updated your status to {spoken_name}"))
            .with_card(format!("Status is {card_state}."));

        self.notifier.notify(&status, None).await;

        reply
    }

    async fn back_in(&self, slots: &Slots) -> Result<SpokenReply, DispatchError> {
        let value = slots.value(DURATION_SLOT).ok_or(DispatchError::MissingSlot {
            intent: "BACK_IN",
            slot: DURATION_SLOT,
        })?;

        let duration = AwayDuration::parse_iso8601(value).map_err(DispatchError::InvalidDuration)?;
        tracing::debug!("Away for {} seconds", duration.as_secs());
        let reply = SpokenReply::speech(format!("I've set you away for {}", duration.spoken()));

        self.notifier.notify(&Status::BackIn, Some(duration)).await;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChatMessage, RecordingSender};

    fn dispatcher() -> (IntentDispatcher<RecordingSender>, RecordingSender) {
        let sender = RecordingSender::default();
        let dispatcher = IntentDispatcher::new(StatusNotifier::new("Ada", sender.clone()));
        (dispatcher, sender)
    }

    fn duration_slot(value: &str) -> Slots {
        [("duration", value)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_here_intent() {
        let (dispatcher, sender) = dispatcher();

        let reply = dispatcher.dispatch("HERE", &Slots::default()).await.unwrap();

        assert_eq!(reply.speech.as_deref(), Some("I've updated your status to Here"));
        assert_eq!(
            reply.card,
            Some(Card {
                title: "Out of Office App".to_owned(),
                content: "Status is in the office.".to_owned(),
            })
        );
        assert_eq!(
            sender.messages(),
            vec![ChatMessage::new(
                "*Status Changed for Ada to: HERE*\nAda is in the office. ".to_owned()
            )]
        );
    }

    #[tokio::test]
    async fn test_status_code_intents() {
        for code in ["BE_RIGHT_BACK", "GONE_HOME", "DO_NOT_DISTURB", "YAAAAY"] {
            let (dispatcher, sender) = dispatcher();

            let reply = dispatcher.dispatch(code, &Slots::default()).await.unwrap();

            assert_eq!(reply.speech, Some(format!("I've updated your status to {code}")));
            assert_eq!(reply.card.map(|c| c.content), Some(format!("Status is {code}.")));

            let messages = sender.messages();
            assert_eq!(messages.len(), 1);
            assert!(
                messages[0].text.starts_with(&format!("*Status Changed for Ada to: {code}*\n")),
                "{}",
                messages[0].text
            );
        }
    }

    #[tokio::test]
    async fn test_back_in_downsamples_spoken_reply() {
        let cases = [
            ("P1DT1H", "I've set you away for 1 days", "1500 minutes"),
            ("PT2H", "I've set you away for 2 hours", "120 minutes"),
            ("PT5M", "I've set you away for 5 minutes", "5 minutes"),
            ("PT2M5S", "I've set you away for 2 minutes", "2 minutes"),
        ];

        for (duration, speech, minutes) in cases {
            let (dispatcher, sender) = dispatcher();

            let reply = dispatcher.dispatch("BACK_IN", &duration_slot(duration)).await.unwrap();

            assert_eq!(reply.speech.as_deref(), Some(speech));
            assert_eq!(reply.card, None);

            let messages = sender.messages();
            assert_eq!(messages.len(), 1);
            assert_eq!(
                messages[0].text,
                format!("*Status Changed for Ada to: BACK_IN*\nAda will be back in {minutes} ")
            );
        }
    }

    #[tokio::test]
    async fn test_back_in_with_malformed_duration_fails() {
        let (dispatcher, sender) = dispatcher();

        let result = dispatcher.dispatch("BACK_IN", &duration_slot("soon")).await;

        assert!(matches!(result, Err(DispatchError::InvalidDuration(_))));
        assert!(sender.messages().is_empty());
    }

    #[tokio::test]
    async fn test_back_in_without_duration_fails() {
        let (dispatcher, sender) = dispatcher();

        let result = dispatcher.dispatch("BACK_IN", &Slots::default()).await;

        assert!(matches!(result, Err(DispatchError::MissingSlot { .. })));
        assert!(sender.messages().is_empty());
    }

    #[tokio::test]
    async fn test_help_does_not_notify() {
        let (dispatcher, sender) = dispatcher();

        let reply = dispatcher.dispatch("AMAZON.HelpIntent", &Slots::default()).await.unwrap();

        assert_eq!(
            reply.speech.as_deref(),
            Some(
                "You can ask me to tell you the current out of office status by saying current status. \
                 You can update your stats by saying tell out of office i'll be right back, i've gone home, \
                 i'm busy, i'm here or i'll be back in 10 minutes"
            )
        );
        assert_eq!(reply.card, None);
        assert!(sender.messages().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_intent_falls_through() {
        let (dispatcher, sender) = dispatcher();

        let reply = dispatcher.dispatch("GetZodiacHoroscopeIntent", &Slots::default()).await.unwrap();

        assert_eq!(reply, SpokenReply::empty());
        assert!(sender.messages().is_empty());
    }

    #[tokio::test]
    async fn test_reply_is_independent_of_delivery() {
        let sender = RecordingSender::failing();
        let dispatcher = IntentDispatcher::new(StatusNotifier::new("Ada", sender.clone()));

        let reply = dispatcher.dispatch("GONE_HOME", &Slots::default()).await.unwrap();

        assert_eq!(reply.speech.as_deref(), Some("I've updated your status to GONE_HOME"));
        assert_eq!(sender.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_dispatch_sends_identical_messages() {
        let (dispatcher, sender) = dispatcher();
        let slots = duration_slot("PT10M");

        let first = dispatcher.dispatch("BACK_IN", &slots).await.unwrap();
        let second = dispatcher.dispatch("BACK_IN", &slots).await.unwrap();

        assert_eq!(first, second);

        let messages = sender.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], messages[1]);
    }
}

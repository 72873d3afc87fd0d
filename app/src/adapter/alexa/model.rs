use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{SpokenReply, Slots};

const RESPONSE_VERSION: &str = "1.0";

/// Verified and parsed Alexa request.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRequest {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub application_id: Option<String>,
    pub kind: RequestKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    Launch,
    Intent { name: String, slots: Slots },
    SessionEnded,
    Other(String),
}

//
// WIRE FORMAT
//

#[derive(Debug, Deserialize)]
pub(super) struct RequestEnvelope {
    session: Option<Session>,
    context: Option<Context>,
    request: RequestBody,
}

#[derive(Debug, Deserialize)]
struct Session {
    application: Application,
}

#[derive(Debug, Deserialize)]
struct Context {
    #[serde(rename = "System")]
    system: SystemContext,
}

#[derive(Debug, Deserialize)]
struct SystemContext {
    application: Application,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Application {
    application_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody {
    #[serde(rename = "type")]
    kind: String,
    request_id: String,
    timestamp: DateTime<Utc>,
    intent: Option<IntentBody>,
}

#[derive(Debug, Deserialize)]
struct IntentBody {
    name: String,
    #[serde(default)]
    slots: HashMap<String, SlotBody>,
}

#[derive(Debug, Deserialize)]
struct SlotBody {
    value: Option<String>,
}

impl From<RequestEnvelope> for SkillRequest {
    fn from(envelope: RequestEnvelope) -> Self {
        //Session is missing for out-of-session requests, context for old clients
        let application_id = envelope
            .context
            .map(|c| c.system.application.application_id)
            .or(envelope.session.map(|s| s.application.application_id));

        let request = envelope.request;

        let kind = match request.kind.as_str() {
            "LaunchRequest" => RequestKind::Launch,
            "SessionEndedRequest" => RequestKind::SessionEnded,
            "IntentRequest" => match request.intent {
                Some(intent) => RequestKind::Intent {
                    name: intent.name,
                    slots: intent
                        .slots
                        .into_iter()
                        .filter_map(|(name, slot)| slot.value.map(|value| (name, value)))
                        .collect(),
                },
                None => RequestKind::Intent {
                    name: String::new(),
                    slots: Slots::default(),
                },
            },
            other => RequestKind::Other(other.to_owned()),
        };

        Self {
            request_id: request.request_id,
            timestamp: request.timestamp,
            application_id,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    version: &'static str,
    session_attributes: HashMap<String, String>,
    response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<CardBody>,
    should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
enum OutputSpeech {
    PlainText { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
enum CardBody {
    Simple { title: String, content: String },
}

impl From<SpokenReply> for ResponseEnvelope {
    fn from(reply: SpokenReply) -> Self {
        Self {
            version: RESPONSE_VERSION,
            session_attributes: HashMap::new(),
            response: ResponseBody {
                output_speech: reply.speech.map(|text| OutputSpeech::PlainText { text }),
                card: reply.card.map(|card| CardBody::Simple {
                    title: card.title,
                    content: card.content,
                }),
                should_end_session: true,
            },
        }
    }
}

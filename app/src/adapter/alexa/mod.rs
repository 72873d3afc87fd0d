mod http_server;
mod model;
mod verify;

pub use http_server::new_routes;
pub use model::{RequestKind, ResponseEnvelope, SkillRequest};
pub use verify::{AlexaRequestVerifier, RequestVerifier, SignatureHeaders};

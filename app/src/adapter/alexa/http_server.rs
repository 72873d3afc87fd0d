use actix_web::web::{self, Bytes};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use derive_more::derive::{Display, Error, From};
use infrastructure::meter;

use super::{RequestKind, RequestVerifier, ResponseEnvelope, SignatureHeaders};
use crate::core::{ChatSender, DispatchError, IntentDispatcher, SpokenReply};

struct AlexaApiState<V, S> {
    verifier: V,
    dispatcher: IntentDispatcher<S>,
}

pub fn new_routes<V, S>(verifier: V, dispatcher: IntentDispatcher<S>) -> actix_web::Scope
where
    V: RequestVerifier + 'static,
    S: ChatSender + 'static,
{
    let state = AlexaApiState { verifier, dispatcher };

    web::scope("/incoming")
        .route("/alexa", web::post().to(handle_alexa_request::<V, S>))
        .app_data(web::Data::new(state))
}

#[derive(Debug, Error, Display, From)]
enum AlexaApiError {
    #[display("Error dispatching intent")]
    Dispatch(DispatchError),
}

impl ResponseError for AlexaApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        tracing::error!("AlexaApiError: {:?}", self);
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn handle_alexa_request<V, S>(
    state: web::Data<AlexaApiState<V, S>>,
    req: HttpRequest,
    body: Bytes,
) -> Result<HttpResponse, AlexaApiError>
where
    V: RequestVerifier + 'static,
    S: ChatSender + 'static,
{
    let headers = SignatureHeaders::from_request(&req);

    let request = match state.verifier.verify_and_parse(&body, &headers) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Rejecting Alexa request: {}", e);
            meter::increment("alexa_request_rejected", &[]);
            return Ok(HttpResponse::Forbidden().finish());
        }
    };

    tracing::info!("Handling Alexa request {}", request.request_id);

    let reply = match &request.kind {
        RequestKind::Intent { name, slots } => state.dispatcher.dispatch(name, slots).await?,
        RequestKind::Launch | RequestKind::SessionEnded => SpokenReply::empty(),
        RequestKind::Other(kind) => {
            tracing::warn!("Ignoring unsupported Alexa request type {}", kind);
            SpokenReply::empty()
        }
    };

    Ok(HttpResponse::Ok().json(ResponseEnvelope::from(reply)))
}

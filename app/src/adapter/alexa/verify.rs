use actix_web::HttpRequest;
use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use reqwest::Url;

use super::SkillRequest;
use super::model::RequestEnvelope;

pub const SIGNATURE_HEADER: &str = "Signature";
pub const CERT_CHAIN_URL_HEADER: &str = "SignatureCertChainUrl";

const CERT_HOST: &str = "s3.amazonaws.com";
const CERT_PATH_PREFIX: &str = "/echo.api/";
const TIMESTAMP_TOLERANCE_SECS: i64 = 150;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub signature: Option<String>,
    pub cert_chain_url: Option<String>,
}

impl SignatureHeaders {
    pub fn from_request(req: &HttpRequest) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        Self {
            signature: header(SIGNATURE_HEADER),
            cert_chain_url: header(CERT_CHAIN_URL_HEADER),
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum VerificationError {
    #[display("Missing request header {header}")]
    MissingHeader { header: &'static str },

    #[display("Invalid certificate chain url {url}: {reason}")]
    InvalidCertificateUrl { url: String, reason: &'static str },

    #[display("Malformed request body: {reason}")]
    MalformedBody { reason: String },

    #[display("Application id {actual:?} does not match the configured one")]
    ApplicationIdMismatch { actual: Option<String> },

    #[display("Request timestamp {timestamp} is outside of the accepted window")]
    StaleTimestamp { timestamp: DateTime<Utc> },
}

pub trait RequestVerifier {
    fn verify_and_parse(&self, body: &[u8], headers: &SignatureHeaders) -> Result<SkillRequest, VerificationError>;
}

/// Checks that a request is meant for this skill and looks like it was sent by Alexa.
/// The signature itself is not validated against the certificate.
#[derive(Debug, Clone)]
pub struct AlexaRequestVerifier {
    application_id: String,
}

impl AlexaRequestVerifier {
    pub fn new(application_id: &str) -> Self {
        Self {
            application_id: application_id.to_owned(),
        }
    }

    pub fn verify_and_parse_at(
        &self,
        body: &[u8],
        headers: &SignatureHeaders,
        now: DateTime<Utc>,
    ) -> Result<SkillRequest, VerificationError> {
        required_header(headers.signature.as_deref(), SIGNATURE_HEADER)?;
        let cert_chain_url = required_header(headers.cert_chain_url.as_deref(), CERT_CHAIN_URL_HEADER)?;
        verify_cert_chain_url(cert_chain_url)?;

        let envelope: RequestEnvelope =
            serde_json::from_slice(body).map_err(|e| VerificationError::MalformedBody { reason: e.to_string() })?;
        let request = SkillRequest::from(envelope);

        if request.application_id.as_deref() != Some(self.application_id.as_str()) {
            return Err(VerificationError::ApplicationIdMismatch {
                actual: request.application_id,
            });
        }

        if (now - request.timestamp).num_seconds().abs() > TIMESTAMP_TOLERANCE_SECS {
            return Err(VerificationError::StaleTimestamp {
                timestamp: request.timestamp,
            });
        }

        Ok(request)
    }
}

impl RequestVerifier for AlexaRequestVerifier {
    fn verify_and_parse(&self, body: &[u8], headers: &SignatureHeaders) -> Result<SkillRequest, VerificationError> {
        self.verify_and_parse_at(body, headers, Utc::now())
    }
}

fn required_header<'a>(value: Option<&'a str>, header: &'static str) -> Result<&'a str, VerificationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(VerificationError::MissingHeader { header }),
    }
}

//Scheme and host are lowercased, dot-segments removed and the default port dropped by the parser
fn verify_cert_chain_url(url: &str) -> Result<(), VerificationError> {
    let invalid = |reason| VerificationError::InvalidCertificateUrl {
        url: url.to_owned(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|_| invalid("not an url"))?;

    if parsed.scheme() != "https" {
        return Err(invalid("scheme must be https"));
    }

    if parsed.host_str() != Some(CERT_HOST) {
        return Err(invalid("unexpected host"));
    }

    if parsed.port().is_some() {
        return Err(invalid("port must be 443"));
    }

    if !parsed.path().starts_with(CERT_PATH_PREFIX) {
        return Err(invalid("unexpected path"));
    }

    Ok(())
}

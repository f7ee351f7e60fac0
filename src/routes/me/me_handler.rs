use actix_web::{HttpRequest, HttpResponse, web};

use super::{
    errors::ValidationError,
    types::{EmailSource, StatusResponse},
};
use crate::domain::EmailAddress;

/// Bodies larger than this are ignored rather than rejected.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Validates the shape of an email taken from `?email=` or, failing that,
/// from the `email` field of a JSON body.
#[tracing::instrument(
    name = "Validating an email address",
    skip(req, body),
    fields(email = tracing::field::Empty, email_source = tracing::field::Empty)
)]
pub async fn me(req: HttpRequest, body: web::Payload) -> Result<HttpResponse, ValidationError> {
    tracing::info!("me function processed a request.");

    // The body is only read when the query string has no usable email.
    let candidate = match email_from_query(req.query_string()) {
        Some(email) => Some((email, EmailSource::Query)),
        None => read_body(body)
            .await
            .and_then(|bytes| email_from_body(&bytes))
            .map(|email| (email, EmailSource::Body)),
    };

    if let Some((email, source)) = &candidate {
        tracing::Span::current().record("email", tracing::field::display(email));
        tracing::Span::current().record("email_source", tracing::field::display(source));
    }

    validate(candidate.map(|(email, _)| email))?;

    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

fn validate(candidate: Option<String>) -> Result<EmailAddress, ValidationError> {
    let candidate = candidate.ok_or(ValidationError::MissingEmail)?;

    EmailAddress::parse(candidate).map_err(|e| ValidationError::InvalidFormat(anyhow::anyhow!(e)))
}

#[tracing::instrument(name = "Reading the request body", skip(body))]
async fn read_body(body: web::Payload) -> Option<web::Bytes> {
    match body.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(bytes)) => Some(bytes),
        Ok(Err(_)) => {
            tracing::warn!(limit = MAX_BODY_BYTES, "Ignoring a request body over the size limit.");
            None
        }
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to read the request body."
            );
            None
        }
    }
}

/// First non-empty `email` parameter. Undecodable query strings yield nothing.
fn email_from_query(query_string: &str) -> Option<String> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string).ok()?;

    pairs
        .into_inner()
        .into_iter()
        .find(|(key, _)| key == "email")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// The `email` field of a JSON object body. Non-string values are kept in
/// their JSON text form so they fail the format check; `null` and `""`
/// count as absent.
fn email_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;

    let email = match value.get("email")? {
        serde_json::Value::Null => return None,
        serde_json::Value::String(email) => email.clone(),
        other => other.to_string(),
    };

    Some(email).filter(|email| !email.is_empty())
}

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::super::helpers::error_chain_fmt;
use super::types::StatusResponse;

#[derive(thiserror::Error)]
pub enum ValidationError {
    #[error("Debe proporcionar un email")]
    MissingEmail,
    #[error("Formato de email inválido")]
    InvalidFormat(#[source] anyhow::Error),
}

impl std::fmt::Debug for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ValidationError {
    fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::MissingEmail | ValidationError::InvalidFormat(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code()).json(StatusResponse::error(self.to_string()))
    }
}

//! HTTP error responses
//!
//! Every failure leaves the API as `{"code": "...", "message": "..."}`.
//! Server-side failures are logged in full and answered with a generic
//! message.

use crate::domain::ClinidataError;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

const INTERNAL_MESSAGE: &str = "erro interno do servidor";

/// Error body returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<ClinidataError> for ApiError {
    fn from(err: ClinidataError) -> Self {
        let status = match &err {
            ClinidataError::Domain(_) => StatusCode::BAD_REQUEST,
            ClinidataError::NotFound { .. } => StatusCode::NOT_FOUND,
            ClinidataError::Conflict(_) => StatusCode::CONFLICT,
            ClinidataError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ClinidataError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => {
                crate::log_error_with_context!(&err, "Request failed");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.code(), INTERNAL_MESSAGE);
            }
        };

        let message = match &err {
            ClinidataError::Conflict(m)
            | ClinidataError::Authentication(m)
            | ClinidataError::Authorization(m) => m.clone(),
            other => other.to_string(),
        };
        Self::new(status, err.code(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code.to_string(),
            message: self.message,
        };
        let mut response = (self.status, Json(body)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use test_case::test_case;

    #[test_case(DomainError::InvalidCep("x".into()).into(), StatusCode::BAD_REQUEST ; "domain")]
    #[test_case(ClinidataError::not_found("Paciente", 1), StatusCode::NOT_FOUND ; "not found")]
    #[test_case(ClinidataError::Conflict("dup".into()), StatusCode::CONFLICT ; "conflict")]
    #[test_case(ClinidataError::Authentication("x".into()), StatusCode::UNAUTHORIZED ; "auth")]
    #[test_case(ClinidataError::Authorization("x".into()), StatusCode::FORBIDDEN ; "forbidden")]
    #[test_case(ClinidataError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR ; "db")]
    fn test_status_mapping(err: ClinidataError, expected: StatusCode) {
        assert_eq!(ApiError::from(err).status(), expected);
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = ApiError::from(ClinidataError::Database("password=hunter2".to_string()));
        assert_eq!(err.code(), "database_error");
        assert_eq!(err.message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_conflict_message_is_bare() {
        let err = ApiError::from(ClinidataError::Conflict("CPF já cadastrado".to_string()));
        assert_eq!(err.message, "CPF já cadastrado");
        assert_eq!(err.code(), "conflict");
    }

    #[test]
    fn test_unauthorized_sets_challenge() {
        let response = ApiError::unauthorized("token ausente").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    }
}

//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns: services fail with
//! [`Error`], and this module translates the code into a status plus a
//! serialized envelope. Internal errors are redacted before they leave the
//! process; the full detail is logged server-side.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::request_id::{REQUEST_ID_HEADER, RequestId};

/// Error envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "title is required")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        if matches!(
            error.code(),
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(code = ?error.code(), message = %error, "request failed");
        }
        Self {
            code: error.code(),
            message: error.message().to_owned(),
            request_id: RequestId::current().map(|id| id.to_string()),
            details: error.details().cloned(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.request_id {
            builder.insert_header((REQUEST_ID_HEADER, id.as_str()));
        }
        if matches!(self.code, ErrorCode::InternalError) {
            let mut redacted = self.clone();
            redacted.message = "internal server error".to_owned();
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("m"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("m"), StatusCode::UNAUTHORIZED)]
    #[case(Error::not_found("m"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("m"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("m"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("m"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(error).status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let api_error = ApiError::from(Error::internal("connection string leaked"));
        let response = api_error.error_response();
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["message"], "internal server error");
        assert!(value.get("details").is_none());
    }

    #[actix_web::test]
    async fn validation_details_survive_serialisation() {
        let api_error = ApiError::from(
            Error::invalid_request("title is required")
                .with_details(serde_json::json!({ "field": "title" })),
        );
        let response = api_error.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["details"]["field"], "title");
    }
}

//! HTTP error response mapping.

use std::fmt;
use std::str::FromStr;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use udaconnect_domain::error::{UdaConnectError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Maps [`UdaConnectError`] to an HTTP response with appropriate status code.
///
/// The body is always `{"message": "An exception of type {kind} occurred. Arguments: {detail}"}`.
#[derive(Debug)]
pub struct ApiError(UdaConnectError);

impl From<UdaConnectError> for ApiError {
    fn from(err: UdaConnectError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            UdaConnectError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            UdaConnectError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            UdaConnectError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let message = format!(
            "An exception of type {} occurred. Arguments: {detail}",
            self.0.kind()
        );
        (status, Json(ErrorBody { message })).into_response()
    }
}

/// How API failures are reported.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// 400 for validation, 404 for not-found, 500 for storage failures.
    #[default]
    Typed,
    /// Every failure is a 400 Bad Request, as legacy clients expect.
    Collapsed,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed => f.write_str("typed"),
            Self::Collapsed => f.write_str("collapsed"),
        }
    }
}

/// Returned when parsing an unknown [`ErrorPolicy`] name.
#[derive(Debug, thiserror::Error)]
#[error("unknown error policy '{0}', expected 'typed' or 'collapsed'")]
pub struct UnknownErrorPolicy(String);

impl FromStr for ErrorPolicy {
    type Err = UnknownErrorPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typed" => Ok(Self::Typed),
            "collapsed" => Ok(Self::Collapsed),
            _ => Err(UnknownErrorPolicy(s.to_owned())),
        }
    }
}

/// Response mapper installed under [`ErrorPolicy::Collapsed`]: any 4xx or
/// 5xx becomes 400, body untouched.
pub async fn collapse_error_status(mut response: Response) -> Response {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        *response.status_mut() = StatusCode::BAD_REQUEST;
    }
    response
}

//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`UdaConnectError`] via `From`. The HTTP adapter maps each variant to a
//! distinct status code.

use std::error::Error as StdError;

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum UdaConnectError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("storage error: {0}")]
    Storage(Box<dyn StdError + Send + Sync>),
}

impl UdaConnectError {
    /// Short name of the error category, as reported to API clients.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NotFound(_) => "NotFoundError",
            Self::Storage(_) => "StorageError",
        }
    }
}

/// Input that violates a domain invariant or cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("'{value}' is not a valid identifier for {field}")]
    InvalidId { field: &'static str, value: String },

    #[error("'{value}' is not a valid date for {field}, expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("missing required parameter {0}")]
    MissingParameter(&'static str),

    #[error("'{0}' is not a valid distance in meters")]
    InvalidDistance(String),

    #[error("start_date {start} is after end_date {end}")]
    InvertedDateRange { start: String, end: String },

    #[error("person {0} does not exist")]
    UnknownPerson(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

/// A lookup by id that matched nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_kind_for_each_variant() {
        let validation: UdaConnectError = ValidationError::MissingParameter("start_date").into();
        let not_found: UdaConnectError = NotFoundError {
            entity: "Person",
            id: "42".to_string(),
        }
        .into();
        let storage = UdaConnectError::Storage("disk on fire".into());

        assert_eq!(validation.kind(), "ValidationError");
        assert_eq!(not_found.kind(), "NotFoundError");
        assert_eq!(storage.kind(), "StorageError");
    }

    #[test]
    fn should_describe_invalid_date_with_field_and_value() {
        let err = ValidationError::InvalidDate {
            field: "start_date",
            value: "not-a-date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'not-a-date' is not a valid date for start_date, expected YYYY-MM-DD"
        );
    }

    #[test]
    fn should_describe_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Location",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Location abc not found");
    }
}

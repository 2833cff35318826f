//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod connections;
#[allow(clippy::missing_errors_doc)]
pub mod locations;
#[allow(clippy::missing_errors_doc)]
pub mod persons;

use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::routing::get;
use axum::{Json, Router};

use udaconnect_app::ports::{LocationRepository, PersonRepository};
use udaconnect_domain::error::ValidationError;

use crate::state::AppState;

/// Build the API sub-router (mounted under `/UdaConnect`).
pub fn routes<LR, PR>() -> Router<AppState<LR, PR>>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    Router::new()
        // Locations
        .route(
            "/locations",
            get(locations::list::<LR, PR>).post(locations::create::<LR, PR>),
        )
        .route("/locations/{location_id}", get(locations::get::<LR, PR>))
        // Persons
        .route(
            "/persons",
            get(persons::list::<LR, PR>).post(persons::create::<LR, PR>),
        )
        .route("/persons/{person_id}", get(persons::get::<LR, PR>))
        // Connections
        .route(
            "/persons/{person_id}/connection",
            get(connections::list::<LR, PR>),
        )
}

/// Unwrap a JSON body, turning axum's rejection into a validation error so it
/// is reported like every other failure.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ValidationError::MalformedRequest(rejection.body_text()))
}

/// Same as [`json_body`] for query strings.
pub(crate) fn query_params<T>(
    params: Result<Query<T>, QueryRejection>,
) -> Result<T, ValidationError> {
    params
        .map(|Query(value)| value)
        .map_err(|rejection| ValidationError::MalformedRequest(rejection.body_text()))
}

//! JSON REST handler for the contact search.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use udaconnect_app::ports::{LocationRepository, PersonRepository};
use udaconnect_domain::connection::Connection;
use udaconnect_domain::error::ValidationError;
use udaconnect_domain::id::PersonId;
use udaconnect_domain::proximity::{DEFAULT_DISTANCE_METERS, ProximityWindow};
use udaconnect_domain::time::{Date, parse_date};

use crate::api::query_params;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the connection endpoint.
///
/// Kept as raw strings so that missing and malformed values are reported
/// through [`ApiError`] like every other failure.
#[derive(Deserialize)]
pub struct ConnectionQuery {
    /// Lower bound of the date range (`YYYY-MM-DD`, inclusive).
    pub start_date: Option<String>,
    /// Upper bound of the date range (`YYYY-MM-DD`, inclusive).
    pub end_date: Option<String>,
    /// Proximity in meters. Defaults to 5.
    pub distance: Option<String>,
}

impl ConnectionQuery {
    fn window(&self) -> Result<ProximityWindow, ApiError> {
        let start_date = required_date("start_date", self.start_date.as_deref())?;
        let end_date = required_date("end_date", self.end_date.as_deref())?;
        let meters = distance(self.distance.as_deref())?;
        Ok(ProximityWindow::new(start_date, end_date, meters)?)
    }
}

fn required_date(field: &'static str, value: Option<&str>) -> Result<Date, ValidationError> {
    let value = value.ok_or(ValidationError::MissingParameter(field))?;
    parse_date(value).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_owned(),
    })
}

fn distance(value: Option<&str>) -> Result<f64, ValidationError> {
    value.map_or(Ok(DEFAULT_DISTANCE_METERS), |raw| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidDistance(raw.to_owned()))
    })
}

/// Possible responses from the connection endpoint.
pub enum ListResponse {
    /// 200 OK with a JSON array of connections.
    Ok(Json<Vec<Connection>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /UdaConnect/persons/{person_id}/connection?start_date=&end_date=&distance=`
pub async fn list<LR, PR>(
    State(state): State<AppState<LR, PR>>,
    Path(person_id): Path<String>,
    params: Result<Query<ConnectionQuery>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let person_id = PersonId::parse_field("person_id", &person_id)?;
    let window = query_params(params)?.window()?;
    tracing::debug!(
        %person_id,
        start_date = %window.start_date,
        end_date = %window.end_date,
        meters = window.meters,
        "searching contacts"
    );

    let connections = state
        .connection_service
        .find_contacts(person_id, window)
        .await?;
    Ok(ListResponse::Ok(Json(connections)))
}

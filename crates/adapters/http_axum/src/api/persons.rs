//! JSON REST handlers for persons.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use udaconnect_app::ports::{LocationRepository, PersonRepository};
use udaconnect_domain::id::PersonId;
use udaconnect_domain::person::Person;

use crate::api::json_body;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a person.
#[derive(Deserialize)]
pub struct CreatePersonRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company_name: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Person>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Person>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Person>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /UdaConnect/persons`
pub async fn list<LR, PR>(
    State(state): State<AppState<LR, PR>>,
) -> Result<ListResponse, ApiError>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let persons = state.person_service.retrieve_all().await?;
    Ok(ListResponse::Ok(Json(persons)))
}

/// `GET /UdaConnect/persons/{person_id}`
pub async fn get<LR, PR>(
    State(state): State<AppState<LR, PR>>,
    Path(person_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let id = PersonId::parse_field("person_id", &person_id)?;
    let person = state.person_service.retrieve(id).await?;
    Ok(GetResponse::Ok(Json(person)))
}

/// `POST /UdaConnect/persons`
pub async fn create<LR, PR>(
    State(state): State<AppState<LR, PR>>,
    payload: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let person = Person::builder()
        .first_name(req.first_name)
        .last_name(req.last_name)
        .company_name(req.company_name)
        .build()?;
    let created = state.person_service.create(person).await?;
    Ok(CreateResponse::Created(Json(created)))
}

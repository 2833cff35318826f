//! JSON REST handlers for locations.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use udaconnect_app::ports::{LocationRepository, PersonRepository};
use udaconnect_domain::id::{LocationId, PersonId};
use udaconnect_domain::location::Location;
use udaconnect_domain::time::Timestamp;

use crate::api::json_body;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for recording a location.
#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub person_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub creation_time: Timestamp,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Location>>),
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
    Ok(Json<Location>),
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
    Created(Json<Location>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /UdaConnect/locations`
pub async fn list<LR, PR>(
    State(state): State<AppState<LR, PR>>,
) -> Result<ListResponse, ApiError>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let locations = state.location_service.retrieve_all().await?;
    Ok(ListResponse::Ok(Json(locations)))
}

/// `GET /UdaConnect/locations/{location_id}`
pub async fn get<LR, PR>(
    State(state): State<AppState<LR, PR>>,
    Path(location_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let id = LocationId::parse_field("location_id", &location_id)?;
    let location = state.location_service.retrieve(id).await?;
    Ok(GetResponse::Ok(Json(location)))
}

/// `POST /UdaConnect/locations`
pub async fn create<LR, PR>(
    State(state): State<AppState<LR, PR>>,
    payload: Result<Json<CreateLocationRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let person_id = PersonId::parse_field("person_id", &req.person_id)?;

    let location = Location::builder()
        .person_id(person_id)
        .coordinate(req.latitude, req.longitude)
        .creation_time(req.creation_time)
        .build()?;
    let created = state.location_service.create(location).await?;
    Ok(CreateResponse::Created(Json(created)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::error::ErrorPolicy;
    use crate::testing::TestApp;

    #[tokio::test]
    async fn should_return_empty_list_when_no_locations() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let (status, body) = app.get("/UdaConnect/locations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn should_create_then_retrieve_same_coordinate_and_time() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let person_id = app.person("Taco").await;
        let created = app
            .visit(&person_id, 35.058_564_5, -106.572_495_7, "2020-08-18T10:37:06Z")
            .await;
        let id = created["id"].as_str().unwrap();

        let (status, fetched) = app.get(&format!("/UdaConnect/locations/{id}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["person_id"], person_id.as_str());
        assert_eq!(fetched["latitude"], 35.058_564_5);
        assert_eq!(fetched["longitude"], -106.572_495_7);
        assert_eq!(fetched["creation_time"], "2020-08-18T10:37:06Z");
    }

    #[tokio::test]
    async fn should_list_created_locations() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let person_id = app.person("Taco").await;
        app.visit(&person_id, 1.0, 2.0, "2020-01-02T00:00:00Z").await;
        app.visit(&person_id, 1.0, 2.0, "2020-01-01T00:00:00Z").await;

        let (status, body) = app.get("/UdaConnect/locations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_reject_location_for_unknown_person() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let body = r#"{"person_id":"0b9a7c1e-3a59-4d5e-8d5c-1f0b8f0e7f7a","latitude":1.0,"longitude":2.0,"creation_time":"2020-01-01T00:00:00Z"}"#;

        let (status, json) = app.post("/UdaConnect/locations", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("does not exist"));
    }

    #[tokio::test]
    async fn should_reject_body_missing_creation_time() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let person_id = app.person("Taco").await;
        let body = format!(r#"{{"person_id":"{person_id}","latitude":1.0,"longitude":2.0}}"#);

        let (status, json) = app.post("/UdaConnect/locations", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("An exception of type ValidationError occurred.")
        );
    }

    #[tokio::test]
    async fn should_reject_out_of_range_latitude() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let person_id = app.person("Taco").await;
        let body = format!(
            r#"{{"person_id":"{person_id}","latitude":91.0,"longitude":2.0,"creation_time":"2020-01-01T00:00:00Z"}}"#
        );

        let (status, json) = app.post("/UdaConnect/locations", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("latitude 91"));
    }

    #[tokio::test]
    async fn should_reject_malformed_location_id() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let (status, json) = app.get("/UdaConnect/locations/42").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("location_id"));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_location() {
        let app = TestApp::new(ErrorPolicy::Typed);
        let (status, _) = app
            .get("/UdaConnect/locations/0b9a7c1e-3a59-4d5e-8d5c-1f0b8f0e7f7a")
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

//! Request helpers for handler tests, over the in-memory repositories from
//! `udaconnect_app::testing`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use udaconnect_app::testing::{InMemoryLocationRepo, InMemoryPersonRepo};

use crate::error::ErrorPolicy;
use crate::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub persons: InMemoryPersonRepo,
    pub locations: InMemoryLocationRepo,
}

impl TestApp {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self::with_repos(InMemoryLocationRepo::default(), InMemoryPersonRepo::default(), policy)
    }

    pub fn with_repos(
        locations: InMemoryLocationRepo,
        persons: InMemoryPersonRepo,
        policy: ErrorPolicy,
    ) -> Self {
        let state = AppState::from_repositories(locations.clone(), persons.clone());
        Self {
            router: crate::router::build(state, policy),
            persons,
            locations,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header("content-type", "application/json");
        }
        let request = request
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_owned())))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        self.send("POST", uri, Some(body)).await
    }

    /// Create a person through the API and return its id.
    pub async fn person(&self, first_name: &str) -> String {
        let body = format!(r#"{{"first_name":"{first_name}","last_name":"Tester","company_name":"Acme"}}"#);
        let (status, json) = self.post("/UdaConnect/persons", &body).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["id"].as_str().unwrap().to_owned()
    }

    /// Record a location through the API and return its JSON.
    pub async fn visit(&self, person_id: &str, lat: f64, lon: f64, at: &str) -> serde_json::Value {
        let body = format!(
            r#"{{"person_id":"{person_id}","latitude":{lat},"longitude":{lon},"creation_time":"{at}"}}"#
        );
        let (status, json) = self.post("/UdaConnect/locations", &body).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json
    }
}

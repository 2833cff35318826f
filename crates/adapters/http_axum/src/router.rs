//! Axum router assembly.

use axum::Router;
use axum::middleware::map_response;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use udaconnect_app::ports::{LocationRepository, PersonRepository};

use crate::error::{ErrorPolicy, collapse_error_status};
use crate::state::AppState;

/// Prefix under which every API route is mounted.
pub const API_PREFIX: &str = "/UdaConnect";

/// Build the top-level axum [`Router`].
///
/// Nests API routes under [`API_PREFIX`] and exposes `/health`.
/// Under [`ErrorPolicy::Collapsed`] every API failure is answered with 400.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<LR, PR>(state: AppState<LR, PR>, error_policy: ErrorPolicy) -> Router
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    let api = match error_policy {
        ErrorPolicy::Typed => crate::api::routes(),
        ErrorPolicy::Collapsed => crate::api::routes().route_layer(map_response(collapse_error_status)),
    };

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

//! Shared application state for axum handlers.

use std::sync::Arc;

use udaconnect_app::ports::{LocationRepository, PersonRepository};
use udaconnect_app::services::connection_service::ConnectionService;
use udaconnect_app::services::location_service::LocationService;
use udaconnect_app::services::person_service::PersonService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<LR, PR> {
    /// Person CRUD service.
    pub person_service: Arc<PersonService<PR>>,
    /// Location CRUD service.
    pub location_service: Arc<LocationService<LR, PR>>,
    /// Contact search.
    pub connection_service: Arc<ConnectionService<LR, PR>>,
}

impl<LR, PR> Clone for AppState<LR, PR> {
    fn clone(&self) -> Self {
        Self {
            person_service: Arc::clone(&self.person_service),
            location_service: Arc::clone(&self.location_service),
            connection_service: Arc::clone(&self.connection_service),
        }
    }
}

impl<LR, PR> AppState<LR, PR>
where
    LR: LocationRepository + Send + Sync + 'static,
    PR: PersonRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        person_service: PersonService<PR>,
        location_service: LocationService<LR, PR>,
        connection_service: ConnectionService<LR, PR>,
    ) -> Self {
        Self {
            person_service: Arc::new(person_service),
            location_service: Arc::new(location_service),
            connection_service: Arc::new(connection_service),
        }
    }

    /// Build every service from one pair of cloneable repositories.
    pub fn from_repositories(locations: LR, persons: PR) -> Self
    where
        LR: Clone,
        PR: Clone,
    {
        Self::new(
            PersonService::new(persons.clone()),
            LocationService::new(locations.clone(), persons.clone()),
            ConnectionService::new(locations, persons),
        )
    }
}

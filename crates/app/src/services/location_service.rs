//! Location service: use-cases for recording and reading locations.

use udaconnect_domain::error::{NotFoundError, UdaConnectError, ValidationError};
use udaconnect_domain::id::LocationId;
use udaconnect_domain::location::Location;
use udaconnect_domain::time::to_micros;

use crate::ports::{LocationRepository, PersonRepository};

/// Application service for location operations.
///
/// Holds a person repository to check that a new location belongs to a known
/// person.
pub struct LocationService<LR, PR> {
    repo: LR,
    persons: PR,
}

impl<LR, PR> LocationService<LR, PR>
where
    LR: LocationRepository,
    PR: PersonRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(repo: LR, persons: PR) -> Self {
        Self { repo, persons }
    }

    /// Record a new location after validating its coordinate and owner.
    ///
    /// `creation_time` is truncated to microseconds, the precision it is
    /// stored with, so the returned location matches a later read.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] if the coordinate is invalid or
    /// the owning person does not exist, or a storage error from a
    /// repository.
    pub async fn create(&self, mut location: Location) -> Result<Location, UdaConnectError> {
        location.validate()?;
        location.creation_time = to_micros(location.creation_time);
        if self.persons.get_by_id(location.person_id).await?.is_none() {
            return Err(ValidationError::UnknownPerson(location.person_id.to_string()).into());
        }
        let created = self.repo.create(location).await?;
        tracing::info!(
            location_id = %created.id,
            person_id = %created.person_id,
            "location recorded"
        );
        Ok(created)
    }

    /// Look up a location by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::NotFound`] when no location with `id`
    /// exists, or a storage error from the repository.
    pub async fn retrieve(&self, id: LocationId) -> Result<Location, UdaConnectError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Location",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all locations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn retrieve_all(&self) -> Result<Vec<Location>, UdaConnectError> {
        self.repo.get_all().await
    }
}

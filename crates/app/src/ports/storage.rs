//! Storage port: repository traits for persistence.
//!
//! Entities are immutable once stored, so there are no update or delete
//! operations.

use std::future::Future;

use udaconnect_domain::error::UdaConnectError;
use udaconnect_domain::id::{LocationId, PersonId};
use udaconnect_domain::location::Location;
use udaconnect_domain::person::Person;
use udaconnect_domain::time::Timestamp;

/// Repository for persisting and querying [`Person`]s.
pub trait PersonRepository {
    /// Persist a new person.
    fn create(&self, person: Person) -> impl Future<Output = Result<Person, UdaConnectError>> + Send;

    /// Get a person by id, `None` when absent.
    fn get_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<Person>, UdaConnectError>> + Send;

    /// List every person, ordered by last name, then first name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Person>, UdaConnectError>> + Send;
}

/// Repository for persisting and querying [`Location`]s.
///
/// Range queries are half-open: `from <= creation_time < to`. Results are
/// ordered by `creation_time` ascending.
pub trait LocationRepository {
    /// Persist a new location.
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, UdaConnectError>> + Send;

    /// Get a location by id, `None` when absent.
    fn get_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, UdaConnectError>> + Send;

    /// List every location.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send;

    /// Locations reported by `person_id` within `[from, to)`.
    fn find_by_person_in_range(
        &self,
        person_id: PersonId,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send;

    /// Locations reported by anyone within `[from, to)`.
    fn find_in_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send;
}

//! Connection service: finds persons who were near a given person.

use std::collections::HashMap;

use udaconnect_domain::connection::Connection;
use udaconnect_domain::error::{NotFoundError, UdaConnectError};
use udaconnect_domain::id::PersonId;
use udaconnect_domain::location::Location;
use udaconnect_domain::person::Person;
use udaconnect_domain::proximity::ProximityWindow;

use crate::ports::{LocationRepository, PersonRepository};

/// Application service correlating location histories.
pub struct ConnectionService<LR, PR> {
    locations: LR,
    persons: PR,
}

impl<LR, PR> ConnectionService<LR, PR>
where
    LR: LocationRepository,
    PR: PersonRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(locations: LR, persons: PR) -> Self {
        Self { locations, persons }
    }

    /// Find every location of another person that lies within
    /// `window.meters` of one of `person_id`'s locations, both reported
    /// inside the window's dates.
    ///
    /// One [`Connection`] is returned per matching pair, ordered by the
    /// queried person's locations and then by the other location's time.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] for an invalid window,
    /// [`UdaConnectError::NotFound`] when `person_id` is unknown, or a
    /// storage error from a repository.
    pub async fn find_contacts(
        &self,
        person_id: PersonId,
        window: ProximityWindow,
    ) -> Result<Vec<Connection>, UdaConnectError> {
        window.validate()?;
        if self.persons.get_by_id(person_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "Person",
                id: person_id.to_string(),
            }
            .into());
        }

        let (from, to) = window.time_range();
        let own = self
            .locations
            .find_by_person_in_range(person_id, from, to)
            .await?;
        if own.is_empty() {
            tracing::debug!(%person_id, "no locations in window");
            return Ok(Vec::new());
        }

        let candidates: Vec<Location> = self
            .locations
            .find_in_range(from, to)
            .await?
            .into_iter()
            .filter(|location| location.person_id != person_id)
            .collect();
        let persons: HashMap<PersonId, Person> = self
            .persons
            .get_all()
            .await?
            .into_iter()
            .map(|person| (person.id, person))
            .collect();

        let mut connections = Vec::new();
        for mine in &own {
            for other in &candidates {
                if !window.is_within(mine.distance_to(other)) {
                    continue;
                }
                let Some(person) = persons.get(&other.person_id) else {
                    tracing::warn!(
                        location_id = %other.id,
                        person_id = %other.person_id,
                        "location references a missing person"
                    );
                    continue;
                };
                connections.push(Connection {
                    location: other.clone(),
                    person: person.clone(),
                });
            }
        }

        tracing::debug!(
            %person_id,
            own = own.len(),
            candidates = candidates.len(),
            found = connections.len(),
            "contact search finished"
        );
        Ok(connections)
    }
}

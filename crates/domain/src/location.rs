//! Location: where a person was at a given moment.

use serde::{Deserialize, Serialize};

use crate::error::UdaConnectError;
use crate::geo::Coordinate;
use crate::id::{LocationId, PersonId};
use crate::time::{Timestamp, to_micros};

/// A single position report for a person.
///
/// Serialized flat: `{ id, person_id, latitude, longitude, creation_time }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub person_id: PersonId,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub creation_time: Timestamp,
}

impl Location {
    /// Create a builder for constructing a [`Location`].
    #[must_use]
    pub fn builder() -> LocationBuilder {
        LocationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] when the coordinate is out of
    /// range.
    pub fn validate(&self) -> Result<(), UdaConnectError> {
        self.coordinate.validate()?;
        Ok(())
    }

    /// Great-circle distance to `other`, in meters.
    #[must_use]
    pub fn distance_to(&self, other: &Location) -> f64 {
        self.coordinate.distance_to(&other.coordinate)
    }
}

/// Step-by-step builder for [`Location`].
#[derive(Debug, Default)]
pub struct LocationBuilder {
    id: Option<LocationId>,
    person_id: Option<PersonId>,
    coordinate: Option<Coordinate>,
    creation_time: Option<Timestamp>,
}

impl LocationBuilder {
    #[must_use]
    pub fn id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn person_id(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }

    #[must_use]
    pub fn coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(Coordinate::new(latitude, longitude));
        self
    }

    #[must_use]
    pub fn creation_time(mut self, creation_time: Timestamp) -> Self {
        self.creation_time = Some(creation_time);
        self
    }

    /// Consume the builder, validate, and return a [`Location`].
    ///
    /// Missing fields fall back to a fresh id, a fresh person id, the
    /// `(0, 0)` coordinate and the current time. `creation_time` is
    /// truncated to microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] if the coordinate is invalid.
    pub fn build(self) -> Result<Location, UdaConnectError> {
        let location = Location {
            id: self.id.unwrap_or_default(),
            person_id: self.person_id.unwrap_or_default(),
            coordinate: self.coordinate.unwrap_or(Coordinate::new(0.0, 0.0)),
            creation_time: to_micros(self.creation_time.unwrap_or_else(crate::time::now)),
        };
        location.validate()?;
        Ok(location)
    }
}

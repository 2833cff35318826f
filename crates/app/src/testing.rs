//! In-memory repositories for exercising services and adapters without a
//! database.
//!
//! Compiled for this crate's tests and for dependents enabling the
//! `testing` feature.

use std::future::Future;
use std::sync::{Arc, Mutex};

use udaconnect_domain::error::UdaConnectError;
use udaconnect_domain::id::{LocationId, PersonId};
use udaconnect_domain::location::Location;
use udaconnect_domain::person::Person;
use udaconnect_domain::time::Timestamp;

use crate::ports::{LocationRepository, PersonRepository};

fn unavailable() -> UdaConnectError {
    UdaConnectError::Storage("database unavailable".into())
}

/// Person store; every call fails with a storage error when `fail` is set.
#[derive(Clone, Default)]
pub struct InMemoryPersonRepo {
    store: Arc<Mutex<Vec<Person>>>,
    pub fail: bool,
}

impl InMemoryPersonRepo {
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl PersonRepository for InMemoryPersonRepo {
    fn create(&self, person: Person) -> impl Future<Output = Result<Person, UdaConnectError>> + Send {
        let result = if self.fail {
            Err(unavailable())
        } else {
            self.store.lock().unwrap().push(person.clone());
            Ok(person)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<Person>, UdaConnectError>> + Send {
        let result = if self.fail {
            Err(unavailable())
        } else {
            let store = self.store.lock().unwrap();
            Ok(store.iter().find(|p| p.id == id).cloned())
        };
        async { result }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Person>, UdaConnectError>> + Send {
        let result = if self.fail {
            Err(unavailable())
        } else {
            Ok(self.store.lock().unwrap().clone())
        };
        async { result }
    }
}

/// Location store that also records every time range it is queried with.
#[derive(Clone, Default)]
pub struct InMemoryLocationRepo {
    store: Arc<Mutex<Vec<Location>>>,
    pub ranges: Arc<Mutex<Vec<(Timestamp, Timestamp)>>>,
    pub fail: bool,
}

impl InMemoryLocationRepo {
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn select(&self, filter: impl Fn(&Location) -> bool) -> Result<Vec<Location>, UdaConnectError> {
        if self.fail {
            return Err(unavailable());
        }
        let mut found: Vec<Location> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|l| filter(l))
            .cloned()
            .collect();
        found.sort_by_key(|l| l.creation_time);
        Ok(found)
    }
}

impl LocationRepository for InMemoryLocationRepo {
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, UdaConnectError>> + Send {
        let result = if self.fail {
            Err(unavailable())
        } else {
            self.store.lock().unwrap().push(location.clone());
            Ok(location)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, UdaConnectError>> + Send {
        let result = self.select(|l| l.id == id).map(|found| found.into_iter().next());
        async { result }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send {
        let result = self.select(|_| true);
        async { result }
    }

    fn find_by_person_in_range(
        &self,
        person_id: PersonId,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send {
        self.ranges.lock().unwrap().push((from, to));
        let result = self.select(|l| {
            l.person_id == person_id && l.creation_time >= from && l.creation_time < to
        });
        async { result }
    }

    fn find_in_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send {
        self.ranges.lock().unwrap().push((from, to));
        let result = self.select(|l| l.creation_time >= from && l.creation_time < to);
        async { result }
    }
}

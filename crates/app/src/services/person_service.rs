//! Person service: use-cases for managing persons.

use udaconnect_domain::error::{NotFoundError, UdaConnectError};
use udaconnect_domain::id::PersonId;
use udaconnect_domain::person::Person;

use crate::ports::PersonRepository;

/// Application service for person operations.
pub struct PersonService<R> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new person after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create(&self, person: Person) -> Result<Person, UdaConnectError> {
        person.validate()?;
        let created = self.repo.create(person).await?;
        tracing::info!(person_id = %created.id, "person created");
        Ok(created)
    }

    /// Look up a person by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::NotFound`] when no person with `id` exists,
    /// or a storage error from the repository.
    pub async fn retrieve(&self, id: PersonId) -> Result<Person, UdaConnectError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Person",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all persons.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn retrieve_all(&self) -> Result<Vec<Person>, UdaConnectError> {
        self.repo.get_all().await
    }
}

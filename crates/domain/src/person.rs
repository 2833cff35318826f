//! Person: someone whose locations are tracked.

use serde::{Deserialize, Serialize};

use crate::error::{UdaConnectError, ValidationError};
use crate::id::PersonId;

/// A tracked person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
}

impl Person {
    /// Create a builder for constructing a [`Person`].
    #[must_use]
    pub fn builder() -> PersonBuilder {
        PersonBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] when `first_name` or
    /// `last_name` is blank.
    pub fn validate(&self) -> Result<(), UdaConnectError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "first_name",
            }
            .into());
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "last_name" }.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Person`].
#[derive(Debug, Default)]
pub struct PersonBuilder {
    id: Option<PersonId>,
    first_name: Option<String>,
    last_name: Option<String>,
    company_name: Option<String>,
}

impl PersonBuilder {
    #[must_use]
    pub fn id(mut self, id: PersonId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Consume the builder, validate, and return a [`Person`].
    ///
    /// # Errors
    ///
    /// Returns [`UdaConnectError::Validation`] if a name is missing or blank.
    pub fn build(self) -> Result<Person, UdaConnectError> {
        let person = Person {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            company_name: self.company_name.unwrap_or_default(),
        };
        person.validate()?;
        Ok(person)
    }
}

//! Connection: a derived "was nearby" record. Never persisted.

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::person::Person;

/// `person` was at `location`, close enough to the queried person during the
/// search window to count as a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub location: Location,
    pub person: Person,
}

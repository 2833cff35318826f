//! # udaconnect-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `PersonRepository`: create, get, list persons
//!   - `LocationRepository`: create, get, list locations, and query them by
//!     time range
//! - Define **driving/inbound ports** as use-case structs:
//!   - `PersonService`: create, retrieve, retrieve all
//!   - `LocationService`: create, retrieve, retrieve all
//!   - `ConnectionService`: find contacts within a proximity window
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `udaconnect-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

//! # udaconnect-domain
//!
//! Pure domain model for the UdaConnect contact-tracing service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Persons** (the people being traced)
//! - Define **Locations** (a person's position at a point in time)
//! - Define **Connections** (derived "was near" records, never stored)
//! - Define the **proximity window** bounding a contact search, and the
//!   geodesic distance used to evaluate it
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod geo;
pub mod id;
pub mod time;

pub mod connection;
pub mod location;
pub mod person;
pub mod proximity;

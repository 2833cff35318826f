//! # udaconnect-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **UdaConnect JSON API** under `/UdaConnect`
//!   (`/locations`, `/persons`, `/persons/{id}/connection`)
//! - Map HTTP requests into application service calls (driving adapter):
//!   path ids, JSON bodies and query strings are parsed here
//! - Map application results into JSON responses, and every failure into a
//!   uniform `{"message": ...}` error body
//!
//! ## Dependency rule
//! Depends on `udaconnect-app` (for port traits and services) and
//! `udaconnect-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;

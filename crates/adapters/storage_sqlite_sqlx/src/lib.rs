//! # udaconnect-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `udaconnect-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `udaconnect-app` (for port traits) and `udaconnect-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod location_repo;
pub mod person_repo;
pub mod pool;

mod codec;

pub use location_repo::SqliteLocationRepository;
pub use person_repo::SqlitePersonRepository;
pub use pool::{Config, Database};

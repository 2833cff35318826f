//! `SQLite` implementation of [`LocationRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use udaconnect_app::ports::LocationRepository;
use udaconnect_domain::error::UdaConnectError;
use udaconnect_domain::geo::Coordinate;
use udaconnect_domain::id::{LocationId, PersonId};
use udaconnect_domain::location::Location;
use udaconnect_domain::time::Timestamp;

use crate::codec::{decode_id, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Location`].
struct Wrapper(Location);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Location> {
        value.map(|w| w.0)
    }

    fn unwrap_all(rows: Vec<Self>) -> Vec<Location> {
        rows.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let person_id: String = row.try_get("person_id")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;
        let creation_time: i64 = row.try_get("creation_time")?;

        Ok(Self(Location {
            id: decode_id(&id)?,
            person_id: decode_id(&person_id)?,
            coordinate: Coordinate::new(latitude, longitude),
            creation_time: decode_timestamp(creation_time)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO locations (id, person_id, latitude, longitude, creation_time)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM locations WHERE id = ?";

const SELECT_ALL: &str = "SELECT * FROM locations ORDER BY creation_time ASC, id ASC";

const SELECT_BY_PERSON_IN_RANGE: &str = r"
    SELECT * FROM locations
    WHERE person_id = ? AND creation_time >= ? AND creation_time < ?
    ORDER BY creation_time ASC, id ASC
";

const SELECT_IN_RANGE: &str = r"
    SELECT * FROM locations
    WHERE creation_time >= ? AND creation_time < ?
    ORDER BY creation_time ASC, id ASC
";

/// `SQLite`-backed location repository.
///
/// `creation_time` is stored as epoch microseconds.
#[derive(Clone)]
pub struct SqliteLocationRepository {
    pool: SqlitePool,
}

impl SqliteLocationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LocationRepository for SqliteLocationRepository {
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, UdaConnectError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(location.id.to_string())
                .bind(location.person_id.to_string())
                .bind(location.coordinate.latitude)
                .bind(location.coordinate.longitude)
                .bind(encode_timestamp(location.creation_time))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(location)
        }
    }

    fn get_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, UdaConnectError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::unwrap_all(rows))
        }
    }

    fn find_by_person_in_range(
        &self,
        person_id: PersonId,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_PERSON_IN_RANGE)
                .bind(person_id.to_string())
                .bind(encode_timestamp(from))
                .bind(encode_timestamp(to))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::unwrap_all(rows))
        }
    }

    fn find_in_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<Location>, UdaConnectError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_IN_RANGE)
                .bind(encode_timestamp(from))
                .bind(encode_timestamp(to))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::unwrap_all(rows))
        }
    }
}

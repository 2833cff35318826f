//! `SQLite` implementation of [`PersonRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use udaconnect_app::ports::PersonRepository;
use udaconnect_domain::error::UdaConnectError;
use udaconnect_domain::id::PersonId;
use udaconnect_domain::person::Person;

use crate::codec::decode_id;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Person`].
struct Wrapper(Person);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Person> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(Person {
            id: decode_id(&id)?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            company_name: row.try_get("company_name")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO persons (id, first_name, last_name, company_name) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM persons WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM persons ORDER BY last_name, first_name, id";

/// `SQLite`-backed person repository.
#[derive(Clone)]
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PersonRepository for SqlitePersonRepository {
    fn create(&self, person: Person) -> impl Future<Output = Result<Person, UdaConnectError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(person.id.to_string())
                .bind(&person.first_name)
                .bind(&person.last_name)
                .bind(&person.company_name)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(person)
        }
    }

    fn get_by_id(
        &self,
        id: PersonId,
    ) -> impl Future<Output = Result<Option<Person>, UdaConnectError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Person>, UdaConnectError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

//! Visitor repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use trailpass_core::{Email, VisitorId};

use super::RepositoryError;
use crate::models::Visitor;
use crate::store::VisitorStore;

/// Repository for visitor records.
pub struct VisitorRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct VisitorRow {
    id: VisitorId,
    full_name: String,
    email: Email,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: VisitorId,
    full_name: String,
    email: Email,
    created_at: DateTime<Utc>,
    password_hash: String,
}

impl From<VisitorRow> for Visitor {
    fn from(row: VisitorRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

impl<'a> VisitorRepository<'a> {
    /// Create a new visitor repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl VisitorStore for VisitorRepository<'_> {
    async fn create(
        &self,
        full_name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Visitor, RepositoryError> {
        let row: VisitorRow = sqlx::query_as(
            r"
            INSERT INTO visitor (full_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, email, created_at
            ",
        )
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    async fn credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(Visitor, String)>, RepositoryError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r"
            SELECT id, full_name, email, created_at, password_hash
            FROM visitor
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let visitor = Visitor {
                id: r.id,
                full_name: r.full_name,
                email: r.email,
                created_at: r.created_at,
            };
            (visitor, r.password_hash)
        }))
    }

    async fn exists(&self, id: VisitorId) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM visitor WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visitor")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

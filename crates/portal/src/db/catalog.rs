//! Catalog repository: parks and products.

use sqlx::PgPool;

use trailpass_core::{Money, ParkId, ProductId, ProductKind};

use super::RepositoryError;
use crate::models::{CatalogRecord, Park, Product};
use crate::store::CatalogLookup;

/// Repository for catalog reference data.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct ParkRow {
    id: ParkId,
    name: String,
    location: String,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    kind: String,
    unit_price: Money,
    park_id: Option<ParkId>,
    park_name: Option<String>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let kind = self
            .kind
            .parse::<ProductKind>()
            .map_err(RepositoryError::DataCorruption)?;
        Ok(Product {
            id: self.id,
            name: self.name,
            kind,
            unit_price: self.unit_price,
            park_id: self.park_id,
            park_name: self.park_name,
        })
    }
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all parks, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_parks(&self) -> Result<Vec<Park>, RepositoryError> {
        let rows: Vec<ParkRow> =
            sqlx::query_as("SELECT id, name, location FROM park ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| Park {
                id: row.id,
                name: row.name,
                location: row.location,
            })
            .collect())
    }

    /// List products, optionally filtered by kind, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` for an unknown stored kind.
    pub async fn list_products(
        &self,
        kind: Option<ProductKind>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT p.id, p.name, p.kind, p.unit_price, p.park_id, k.name AS park_name
            FROM product p
            LEFT JOIN park k ON p.park_id = k.id
            WHERE $1::TEXT IS NULL OR p.kind = $1
            ORDER BY p.id
            ",
        )
        .bind(kind.map(ProductKind::as_str))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}

impl CatalogLookup for CatalogRepository<'_> {
    async fn resolve(&self, ids: &[ProductId]) -> Result<Vec<CatalogRecord>, RepositoryError> {
        let ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();

        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT p.id, p.name, p.kind, p.unit_price, p.park_id, k.name AS park_name
            FROM product p
            LEFT JOIN park k ON p.park_id = k.id
            WHERE p.id = ANY($1)
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CatalogRecord {
                product_id: row.id,
                name: row.name,
                park_name: row.park_name,
                unit_price: row.unit_price,
            })
            .collect())
    }
}

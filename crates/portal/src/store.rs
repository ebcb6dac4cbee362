//! Persistence and catalog contracts consumed by the services.
//!
//! The checkout pipeline is written against these traits rather than the
//! Postgres repositories directly, so the pipeline's invariants (payment
//! outcome gates persistence, atomic order+lines creation, conditional
//! status transitions) can be exercised with in-memory implementations.

use chrono::NaiveDate;

use trailpass_core::{Email, OrderId, ProductId, VisitorId};

use crate::db::RepositoryError;
use crate::models::{CatalogRecord, NewOrder, Order, Visitor};

/// Resolves requested product ids to authoritative catalog records.
pub trait CatalogLookup {
    /// Return the catalog records matching `ids`.
    ///
    /// Unknown ids are simply absent from the result; the caller compares
    /// counts and treats any shortfall as a hard validation failure. The
    /// lookup never substitutes or invents records.
    async fn resolve(&self, ids: &[ProductId]) -> Result<Vec<CatalogRecord>, RepositoryError>;
}

/// Visitor directory: registration and existence checks.
pub trait VisitorStore {
    /// Create a visitor; the email must be unique (case-insensitively).
    async fn create(
        &self,
        full_name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Visitor, RepositoryError>;

    /// Fetch a visitor together with their credential hash.
    async fn credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(Visitor, String)>, RepositoryError>;

    /// Whether a visitor with this id exists.
    async fn exists(&self, id: VisitorId) -> Result<bool, RepositoryError>;

    /// Total number of registered visitors.
    async fn count(&self) -> Result<i64, RepositoryError>;
}

/// Order persistence: atomic creation and conditional status transitions.
pub trait OrderStore {
    /// Persist an order together with all of its lines in one atomic unit.
    ///
    /// Implementations must guarantee a partial write can never leave an
    /// order without its lines or vice versa.
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// All orders belonging to a visitor, newest first.
    async fn orders_for(&self, visitor: VisitorId) -> Result<Vec<Order>, RepositoryError>;

    /// All orders in the system, newest first.
    async fn all_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Cancel an order. The update applies only if the order belongs to
    /// `visitor` and is currently cancellable; returns the number of rows
    /// affected (zero covers missing, not-owned, and already-terminal alike).
    async fn cancel(&self, visitor: VisitorId, order: OrderId) -> Result<u64, RepositoryError>;

    /// Move an order's visit date. Scoped exactly like [`OrderStore::cancel`]:
    /// owner-matching, reschedulable rows only; returns rows affected.
    async fn reschedule(
        &self,
        visitor: VisitorId,
        order: OrderId,
        visit_date: NaiveDate,
    ) -> Result<u64, RepositoryError>;
}

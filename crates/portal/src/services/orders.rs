//! Order lifecycle operations: history, cancel, reschedule.
//!
//! Cancel and reschedule are thin wrappers over the store's conditional
//! updates. The store applies each transition as a single atomic `UPDATE`
//! scoped to the owning visitor and the current status, so two concurrent
//! cancels serialize there; this service only interprets the affected-row
//! count. Zero rows deliberately collapses "not found", "not owned", and
//! "already terminal" into one generic failure.

use chrono::NaiveDate;
use thiserror::Error;

use trailpass_core::{OrderId, VisitorId};

use crate::db::RepositoryError;
use crate::models::OrderDto;
use crate::store::OrderStore;

/// Failures for cancel/reschedule/history.
#[derive(Debug, Error)]
pub enum OrderActionError {
    #[error("Order not found or already cancelled.")]
    NotCancellable,

    #[error("Order not found or cannot be rescheduled.")]
    NotReschedulable,

    #[error("Please select a valid visit date.")]
    InvalidVisitDate,

    #[error("persistence failure: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Order history and status-transition service.
pub struct OrderService<S> {
    orders: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Create a new order service.
    pub const fn new(orders: S) -> Self {
        Self { orders }
    }

    /// A visitor's order history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderActionError::Persistence`] if the store fails.
    pub async fn history(&self, visitor: VisitorId) -> Result<Vec<OrderDto>, OrderActionError> {
        let orders = self.orders.orders_for(visitor).await?;
        Ok(orders.into_iter().map(Into::into).collect())
    }

    /// Cancel a confirmed order owned by `visitor`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderActionError::NotCancellable`] when no row matched
    /// (missing, not owned, or already cancelled - indistinguishable by
    /// design).
    pub async fn cancel(
        &self,
        visitor: VisitorId,
        order: OrderId,
    ) -> Result<(), OrderActionError> {
        let affected = self.orders.cancel(visitor, order).await?;
        if affected == 0 {
            return Err(OrderActionError::NotCancellable);
        }
        tracing::info!(visitor_id = %visitor, order_id = %order, "order cancelled");
        Ok(())
    }

    /// Move a confirmed order's visit date.
    ///
    /// # Errors
    ///
    /// Returns [`OrderActionError::InvalidVisitDate`] for an unparseable
    /// date, or [`OrderActionError::NotReschedulable`] when no row matched.
    pub async fn reschedule(
        &self,
        visitor: VisitorId,
        order: OrderId,
        visit_date: &str,
    ) -> Result<(), OrderActionError> {
        let visit_date = visit_date
            .trim()
            .parse::<NaiveDate>()
            .map_err(|_| OrderActionError::InvalidVisitDate)?;

        let affected = self.orders.reschedule(visitor, order, visit_date).await?;
        if affected == 0 {
            return Err(OrderActionError::NotReschedulable);
        }
        tracing::info!(
            visitor_id = %visitor,
            order_id = %order,
            visit_date = %visit_date,
            "order rescheduled"
        );
        Ok(())
    }
}

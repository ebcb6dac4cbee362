//! Admin report: a read-only rollup over the order store.
//!
//! No filtering or pagination; acceptable at current scale.

use serde::Serialize;

use trailpass_core::Money;

use crate::db::RepositoryError;
use crate::models::OrderDto;
use crate::store::{OrderStore, VisitorStore};

/// The admin rollup: counts, revenue sum, and the full order listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemReport {
    pub total_visitors: i64,
    pub total_orders: usize,
    pub total_revenue: Money,
    pub orders: Vec<OrderDto>,
}

/// Read-only report aggregator.
pub struct ReportService<S, V> {
    orders: S,
    visitors: V,
}

impl<S: OrderStore, V: VisitorStore> ReportService<S, V> {
    /// Create a new report service.
    pub const fn new(orders: S, visitors: V) -> Self {
        Self { orders, visitors }
    }

    /// Build the system summary.
    ///
    /// Revenue is the exact fixed-point sum of every order's total.
    /// `totalVisitors` counts every registered visitor, purchaser or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if either store fails.
    pub async fn summary(&self) -> Result<SystemReport, RepositoryError> {
        let total_visitors = self.visitors.count().await?;
        let orders = self.orders.all_orders().await?;

        let total_revenue: Money = orders.iter().map(|order| order.total_amount).sum();
        let orders: Vec<OrderDto> = orders.into_iter().map(Into::into).collect();

        Ok(SystemReport {
            total_visitors,
            total_orders: orders.len(),
            total_revenue,
            orders,
        })
    }
}

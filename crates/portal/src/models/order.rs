//! Order domain types and their DTOs.
//!
//! An order exclusively owns its lines; both are created together in one
//! atomic store operation and the lines (and the total they sum to) are never
//! mutated afterwards. Only the status and the visit date can change, via the
//! store's conditional transitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use trailpass_core::{Money, OrderId, OrderItemId, OrderStatus, PaymentMethod, ProductId, VisitorId};

/// One line of a submitted cart: a product reference plus a quantity.
///
/// Transient and client-held; never persisted as-is.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart line resolved against the catalog at checkout time.
///
/// Locks the unit price and the denormalized display fields; immutable once
/// created. The locked values are what get persisted, so later catalog
/// changes cannot alter an order's history.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub park_name: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
}

impl PricedLine {
    /// Exact line total: locked unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// A fully priced order ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub visitor_id: VisitorId,
    pub payment_method: PaymentMethod,
    pub visit_date: NaiveDate,
    pub total_amount: Money,
    pub lines: Vec<PricedLine>,
}

/// A persisted order line.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub name: String,
    pub park_name: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
}

/// A persisted order with all of its lines.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub visitor_id: VisitorId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub visit_date: NaiveDate,
    pub lines: Vec<OrderLine>,
}

// =============================================================================
// DTOs
// =============================================================================

/// The order shape served by the JSON API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub visit_date: NaiveDate,
    pub items: Vec<OrderItemDto>,
}

/// One order line as served by the JSON API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub name: String,
    pub park_name: Option<String>,
    pub quantity: u32,
    pub locked_price: Money,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            created_at: order.created_at,
            status: order.status,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            visit_date: order.visit_date,
            items: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderLine> for OrderItemDto {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            name: line.name,
            park_name: line.park_name,
            quantity: line.quantity,
            locked_price: line.unit_price,
        }
    }
}

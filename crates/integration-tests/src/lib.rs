//! Integration test support for Trailpass.
//!
//! Provides [`TestBackend`], a single in-memory implementation of all three
//! portal store contracts, so the full pipeline (register, checkout, cancel,
//! reschedule, report) runs end to end in-process without `PostgreSQL`.
//!
//! The backend enforces the same semantics the Postgres repositories do:
//! case-insensitive email uniqueness, orders persisted atomically as
//! `CONFIRMED`, and cancel/reschedule as conditional updates returning the
//! number of rows affected.
//!
//! ```bash
//! cargo test -p trailpass-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(async_fn_in_trait)]
// Test support: a poisoned lock should abort the test run loudly.
#![allow(clippy::expect_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, Utc};

use trailpass_core::{Email, Money, OrderId, OrderItemId, OrderStatus, ProductId, VisitorId};
use trailpass_portal::db::RepositoryError;
use trailpass_portal::models::{CatalogRecord, NewOrder, Order, OrderLine, Visitor};
use trailpass_portal::store::{CatalogLookup, OrderStore, VisitorStore};

struct StoredVisitor {
    visitor: Visitor,
    password_hash: String,
}

/// In-memory stand-in for the portal's Postgres-backed stores.
#[derive(Default)]
pub struct TestBackend {
    catalog: Vec<CatalogRecord>,
    visitors: Mutex<Vec<StoredVisitor>>,
    orders: Mutex<Vec<Order>>,
    next_visitor_id: AtomicI64,
    next_order_id: AtomicI64,
    next_item_id: AtomicI64,
}

impl TestBackend {
    /// An empty backend with no catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog product; returns its id for cart building.
    pub fn add_product(
        &mut self,
        id: i64,
        name: &str,
        park_name: Option<&str>,
        price_cents: u64,
    ) -> ProductId {
        let product_id = ProductId::new(id);
        self.catalog.push(CatalogRecord {
            product_id,
            name: name.to_owned(),
            park_name: park_name.map(str::to_owned),
            unit_price: Money::from_cents(price_cents),
        });
        product_id
    }

    /// Number of persisted orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.lock().expect("orders lock poisoned").len()
    }

    /// Snapshot of a persisted order.
    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.orders
            .lock()
            .expect("orders lock poisoned")
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }
}

impl CatalogLookup for &TestBackend {
    async fn resolve(&self, ids: &[ProductId]) -> Result<Vec<CatalogRecord>, RepositoryError> {
        Ok(self
            .catalog
            .iter()
            .filter(|record| ids.contains(&record.product_id))
            .cloned()
            .collect())
    }
}

impl VisitorStore for &TestBackend {
    async fn create(
        &self,
        full_name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Visitor, RepositoryError> {
        let mut visitors = self.visitors.lock().expect("visitors lock poisoned");

        if visitors.iter().any(|v| v.visitor.email == *email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let id = VisitorId::new(self.next_visitor_id.fetch_add(1, Ordering::SeqCst) + 1);
        let visitor = Visitor {
            id,
            full_name: full_name.to_owned(),
            email: email.clone(),
            created_at: Utc::now(),
        };
        visitors.push(StoredVisitor {
            visitor: visitor.clone(),
            password_hash: password_hash.to_owned(),
        });
        Ok(visitor)
    }

    async fn credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(Visitor, String)>, RepositoryError> {
        let visitors = self.visitors.lock().expect("visitors lock poisoned");
        Ok(visitors
            .iter()
            .find(|v| v.visitor.email == *email)
            .map(|v| (v.visitor.clone(), v.password_hash.clone())))
    }

    async fn exists(&self, id: VisitorId) -> Result<bool, RepositoryError> {
        let visitors = self.visitors.lock().expect("visitors lock poisoned");
        Ok(visitors.iter().any(|v| v.visitor.id == id))
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let visitors = self.visitors.lock().expect("visitors lock poisoned");
        Ok(i64::try_from(visitors.len()).unwrap_or(i64::MAX))
    }
}

impl OrderStore for &TestBackend {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.lock().expect("orders lock poisoned");

        let id = OrderId::new(self.next_order_id.fetch_add(1, Ordering::SeqCst) + 1);
        let lines = order
            .lines
            .iter()
            .map(|line| OrderLine {
                id: OrderItemId::new(self.next_item_id.fetch_add(1, Ordering::SeqCst) + 1),
                product_id: line.product_id,
                name: line.name.clone(),
                park_name: line.park_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        let order = Order {
            id,
            visitor_id: order.visitor_id,
            created_at: Utc::now(),
            status: OrderStatus::Confirmed,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            visit_date: order.visit_date,
            lines,
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn orders_for(&self, visitor: VisitorId) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.lock().expect("orders lock poisoned");
        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|order| order.visitor_id == visitor)
            .cloned()
            .collect();
        matching.sort_by_key(|order| std::cmp::Reverse(order.id));
        Ok(matching)
    }

    async fn all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.lock().expect("orders lock poisoned");
        let mut all: Vec<Order> = orders.clone();
        all.sort_by_key(|order| std::cmp::Reverse(order.id));
        Ok(all)
    }

    async fn cancel(&self, visitor: VisitorId, order: OrderId) -> Result<u64, RepositoryError> {
        let mut orders = self.orders.lock().expect("orders lock poisoned");
        let target = orders.iter_mut().find(|o| {
            o.id == order && o.visitor_id == visitor && o.status.is_cancellable()
        });
        match target {
            Some(o) => {
                o.status = OrderStatus::Cancelled;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn reschedule(
        &self,
        visitor: VisitorId,
        order: OrderId,
        visit_date: NaiveDate,
    ) -> Result<u64, RepositoryError> {
        let mut orders = self.orders.lock().expect("orders lock poisoned");
        let target = orders.iter_mut().find(|o| {
            o.id == order && o.visitor_id == visitor && o.status.is_reschedulable()
        });
        match target {
            Some(o) => {
                o.visit_date = visit_date;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

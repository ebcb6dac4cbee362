//! Order repository.
//!
//! Order creation is transactional: the order row and every line row commit
//! together or not at all. Status transitions are single conditional
//! `UPDATE`s scoped to the owning visitor and the current status, so
//! concurrent transitions serialize in Postgres and at most one wins.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use trailpass_core::{Money, OrderId, OrderItemId, OrderStatus, PaymentMethod, ProductId, VisitorId};

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderLine};
use crate::store::OrderStore;

/// Repository for orders and their lines.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    visitor_id: VisitorId,
    created_at: DateTime<Utc>,
    status: String,
    total_amount: Money,
    payment_method: String,
    visit_date: NaiveDate,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    name: String,
    park_name: Option<String>,
    quantity: i32,
    unit_price: Money,
}

impl ItemRow {
    fn into_line(self) -> Result<(OrderId, OrderLine), RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity {} on order item {}",
                self.quantity, self.id
            ))
        })?;
        let line = OrderLine {
            id: self.id,
            product_id: self.product_id,
            name: self.name,
            park_name: self.park_name,
            quantity,
            unit_price: self.unit_price,
        };
        Ok((self.order_id, line))
    }
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Attach lines to the given order rows, preserving row order.
    async fn assemble(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, RepositoryError> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id.as_i64()).collect();

        let items: Vec<ItemRow> = sqlx::query_as(
            r"
            SELECT id, order_id, product_id, name, park_name, quantity, unit_price
            FROM order_item
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: HashMap<OrderId, Vec<OrderLine>> = HashMap::new();
        for item in items {
            let (order_id, line) = item.into_line()?;
            by_order.entry(order_id).or_default().push(line);
        }

        rows.into_iter()
            .map(|row| {
                let status = row
                    .status
                    .parse::<OrderStatus>()
                    .map_err(RepositoryError::DataCorruption)?;
                let payment_method = row
                    .payment_method
                    .parse::<PaymentMethod>()
                    .map_err(RepositoryError::DataCorruption)?;
                Ok(Order {
                    id: row.id,
                    visitor_id: row.visitor_id,
                    created_at: row.created_at,
                    status,
                    total_amount: row.total_amount,
                    payment_method,
                    visit_date: row.visit_date,
                    lines: by_order.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }
}

impl OrderStore for OrderRepository<'_> {
    async fn create(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (id, created_at): (OrderId, DateTime<Utc>) = sqlx::query_as(
            r"
            INSERT INTO orders (visitor_id, status, total_amount, payment_method, visit_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            ",
        )
        .bind(order.visitor_id)
        .bind(OrderStatus::Confirmed.as_str())
        .bind(order.total_amount)
        .bind(order.payment_method.as_str())
        .bind(order.visit_date)
        .fetch_one(&mut *tx)
        .await?;

        let mut lines = Vec::with_capacity(order.lines.len());
        for priced in &order.lines {
            let quantity = i32::try_from(priced.quantity).map_err(|_| {
                RepositoryError::Conflict(format!("quantity {} out of range", priced.quantity))
            })?;

            let (item_id,): (OrderItemId,) = sqlx::query_as(
                r"
                INSERT INTO order_item (order_id, product_id, name, park_name, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                ",
            )
            .bind(id)
            .bind(priced.product_id)
            .bind(&priced.name)
            .bind(&priced.park_name)
            .bind(quantity)
            .bind(priced.unit_price)
            .fetch_one(&mut *tx)
            .await?;

            lines.push(OrderLine {
                id: item_id,
                product_id: priced.product_id,
                name: priced.name.clone(),
                park_name: priced.park_name.clone(),
                quantity: priced.quantity,
                unit_price: priced.unit_price,
            });
        }

        tx.commit().await?;

        Ok(Order {
            id,
            visitor_id: order.visitor_id,
            created_at,
            status: OrderStatus::Confirmed,
            total_amount: order.total_amount,
            payment_method: order.payment_method,
            visit_date: order.visit_date,
            lines,
        })
    }

    async fn orders_for(&self, visitor: VisitorId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, visitor_id, created_at, status, total_amount, payment_method, visit_date
            FROM orders
            WHERE visitor_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(visitor)
        .fetch_all(self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, visitor_id, created_at, status, total_amount, payment_method, visit_date
            FROM orders
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn cancel(&self, visitor: VisitorId, order: OrderId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET status = $1
            WHERE id = $2 AND visitor_id = $3 AND status = $4
            ",
        )
        .bind(OrderStatus::Cancelled.as_str())
        .bind(order)
        .bind(visitor)
        .bind(OrderStatus::Confirmed.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn reschedule(
        &self,
        visitor: VisitorId,
        order: OrderId,
        visit_date: NaiveDate,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET visit_date = $1
            WHERE id = $2 AND visitor_id = $3 AND status = $4
            ",
        )
        .bind(visit_date)
        .bind(order)
        .bind(visitor)
        .bind(OrderStatus::Confirmed.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

//! Checkout orchestrator: the single entry point that validates, prices,
//! charges, and persists an order.
//!
//! The pipeline is strictly ordered and fails fast - every validation runs
//! before any side effect, payment runs before persistence, and an order is
//! persisted (atomically, with all its lines, directly as `CONFIRMED`) only
//! after the payment simulation approves. A declined payment persists
//! nothing. There are no retries; a store failure after an approved
//! simulation surfaces as a persistence error.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use trailpass_core::{PaymentMethod, VisitorId};

use crate::config::CheckoutPolicy;
use crate::db::RepositoryError;
use crate::models::{CartLine, NewOrder, OrderDto};
use crate::payment::{PaymentDetails, PaymentOutcome, PaymentStrategy};
use crate::pricing::{price_cart, total_quantity};
use crate::store::{CatalogLookup, OrderStore, VisitorStore};

/// A checkout submission: the fully-formed cart plus payment selection.
///
/// The browser-side cart is ephemeral UI state; the pipeline only ever sees
/// this one-shot submission.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub visitor_id: Option<VisitorId>,
    pub cart: Vec<CartLine>,
    pub payment_method: PaymentMethod,
    /// ISO date string as submitted; parsed (and validated) by the pipeline.
    pub visit_date: Option<String>,
    pub payment: PaymentDetails,
}

/// Successful checkout result: the persisted order plus the payment
/// strategy's success message.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub message: String,
    pub order: OrderDto,
}

/// Failures the checkout pipeline can produce.
///
/// Every variant carries a short user-facing message; validation failures
/// are detected before any side effect.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("You must be logged in to checkout.")]
    Unauthenticated,

    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Please select a valid visit date.")]
    InvalidVisitDate,

    #[error("Max {limit} tickets per order.")]
    QuantityLimitExceeded { limit: u32 },

    #[error("Some items in your cart are invalid.")]
    InvalidCartItem,

    /// The payment strategy declined; carries the strategy's message.
    #[error("{0}")]
    PaymentDeclined(String),

    /// Unrecovered store failure. The payment simulation has already
    /// approved at this point; see DESIGN.md for why this ordering stands.
    #[error("persistence failure: {0}")]
    Persistence(#[from] RepositoryError),
}

/// The checkout orchestrator, generic over its collaborator contracts.
pub struct CheckoutService<C, V, S> {
    catalog: C,
    visitors: V,
    orders: S,
    policy: CheckoutPolicy,
}

impl<C, V, S> CheckoutService<C, V, S>
where
    C: CatalogLookup,
    V: VisitorStore,
    S: OrderStore,
{
    /// Create a new checkout service.
    pub const fn new(catalog: C, visitors: V, orders: S, policy: CheckoutPolicy) -> Self {
        Self {
            catalog,
            visitors,
            orders,
            policy,
        }
    }

    /// Run the checkout pipeline for one submission.
    ///
    /// Validation order (first violation wins): authenticated visitor,
    /// non-empty cart, parseable visit date, per-order quantity cap, then
    /// catalog resolution of every distinct id. Only then is the cart priced,
    /// the payment strategy executed, and - on approval - the order persisted.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] naming the first violated rule, the
    /// payment decline message, or the persistence failure.
    pub async fn checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let visitor_id = request.visitor_id.ok_or(CheckoutError::Unauthenticated)?;

        if request.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let visit_date = parse_visit_date(request.visit_date.as_deref())?;

        if request.cart.iter().any(|line| line.quantity == 0) {
            return Err(CheckoutError::InvalidCartItem);
        }

        let quantity = total_quantity(&request.cart);
        if quantity > u64::from(self.policy.max_tickets_per_order) {
            return Err(CheckoutError::QuantityLimitExceeded {
                limit: self.policy.max_tickets_per_order,
            });
        }

        if !self.visitors.exists(visitor_id).await? {
            return Err(CheckoutError::Unauthenticated);
        }

        // Resolve every distinct requested id; any shortfall is a hard
        // failure, never a silent drop or substitution.
        let distinct_ids: BTreeSet<_> = request.cart.iter().map(|line| line.product_id).collect();
        let distinct_ids: Vec<_> = distinct_ids.into_iter().collect();
        let records = self.catalog.resolve(&distinct_ids).await?;
        if records.len() != distinct_ids.len() {
            return Err(CheckoutError::InvalidCartItem);
        }

        let priced = price_cart(&request.cart, &records).ok_or(CheckoutError::InvalidCartItem)?;

        let strategy = PaymentStrategy::select(request.payment_method, &request.payment);
        match strategy.execute(priced.total) {
            PaymentOutcome::Declined(message) => {
                tracing::info!(
                    visitor_id = %visitor_id,
                    method = %request.payment_method,
                    total = %priced.total,
                    "checkout payment declined"
                );
                Err(CheckoutError::PaymentDeclined(message))
            }
            PaymentOutcome::Approved(message) => {
                let order = self
                    .orders
                    .create(NewOrder {
                        visitor_id,
                        payment_method: request.payment_method,
                        visit_date,
                        total_amount: priced.total,
                        lines: priced.lines,
                    })
                    .await?;

                tracing::info!(
                    visitor_id = %visitor_id,
                    order_id = %order.id,
                    total = %order.total_amount,
                    method = %request.payment_method,
                    "checkout completed"
                );

                Ok(CheckoutReceipt {
                    message,
                    order: order.into(),
                })
            }
        }
    }
}

/// Parse a required ISO visit date.
fn parse_visit_date(raw: Option<&str>) -> Result<NaiveDate, CheckoutError> {
    raw.and_then(|s| s.trim().parse::<NaiveDate>().ok())
        .ok_or(CheckoutError::InvalidVisitDate)
}

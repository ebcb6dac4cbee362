//! Order route handlers: checkout, history, cancel, reschedule.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use trailpass_core::{OrderId, PaymentMethod, VisitorId};

use crate::db::{CatalogRepository, OrderRepository, VisitorRepository};
use crate::error::AppError;
use crate::models::CartLine;
use crate::payment::PaymentDetails;
use crate::services::{CheckoutRequest, CheckoutService, OrderService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub visitor_id: Option<VisitorId>,
    #[serde(default)]
    pub cart_items: Vec<CartLine>,
    /// Raw method tag; unknown or missing tags fall back to `DUMMY`.
    pub payment_method: Option<String>,
    pub visit_date: Option<String>,
    #[serde(default)]
    pub payment_details: PaymentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    pub visitor_id: VisitorId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelPayload {
    pub visitor_id: VisitorId,
    pub order_id: OrderId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReschedulePayload {
    pub visitor_id: VisitorId,
    pub order_id: OrderId,
    #[serde(default)]
    pub visit_date: String,
}

/// POST /api/orders/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payment_method = payload
        .payment_method
        .as_deref()
        .map_or_else(PaymentMethod::default, PaymentMethod::from_tag);

    let service = CheckoutService::new(
        CatalogRepository::new(state.pool()),
        VisitorRepository::new(state.pool()),
        OrderRepository::new(state.pool()),
        state.config().checkout.clone(),
    );

    let receipt = service
        .checkout(CheckoutRequest {
            visitor_id: payload.visitor_id,
            cart: payload.cart_items,
            payment_method,
            visit_date: payload.visit_date,
            payment: payload.payment_details,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": receipt.message,
        "order": receipt.order,
    })))
}

/// GET /api/orders/history?visitorId=
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let service = OrderService::new(OrderRepository::new(state.pool()));
    let orders = service.history(params.visitor_id).await?;

    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// POST /api/orders/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Json(payload): Json<CancelPayload>,
) -> Result<impl IntoResponse, AppError> {
    let service = OrderService::new(OrderRepository::new(state.pool()));
    service.cancel(payload.visitor_id, payload.order_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order cancelled.",
    })))
}

/// POST /api/orders/reschedule
pub async fn reschedule(
    State(state): State<AppState>,
    Json(payload): Json<ReschedulePayload>,
) -> Result<impl IntoResponse, AppError> {
    let service = OrderService::new(OrderRepository::new(state.pool()));
    service
        .reschedule(payload.visitor_id, payload.order_id, &payload.visit_date)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order rescheduled.",
    })))
}

//! JSON API route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness probe
//!
//! # Auth
//! POST /api/auth/register           - Register a visitor
//! POST /api/auth/login              - Login with email + password
//!
//! # Catalog
//! GET  /api/catalog/parks           - List parks
//! GET  /api/catalog/products        - List products (?kind=TICKET|MERCH)
//!
//! # Orders
//! POST /api/orders/checkout         - Run the checkout pipeline
//! GET  /api/orders/history          - Order history (?visitorId=)
//! POST /api/orders/cancel           - Cancel a confirmed order
//! POST /api/orders/reschedule       - Move a confirmed order's visit date
//!
//! # Admin
//! GET  /api/admin/report            - System rollup (header-authenticated)
//! ```
//!
//! All bodies are camelCase JSON. Every response carries a `success` flag;
//! failures come from [`crate::error::AppError`] with a `message`.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/parks", get(catalog::parks))
        .route("/products", get(catalog::products))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(orders::checkout))
        .route("/history", get(orders::history))
        .route("/cancel", post(orders::cancel))
        .route("/reschedule", post(orders::reschedule))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/report", get(admin::report))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/catalog", catalog_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/admin", admin_routes())
}

//! Admin report rollup over the in-memory backend.

#![allow(clippy::unwrap_used)]

use trailpass_core::{Money, PaymentMethod};
use trailpass_integration_tests::TestBackend;
use trailpass_portal::config::CheckoutPolicy;
use trailpass_portal::models::CartLine;
use trailpass_portal::payment::PaymentDetails;
use trailpass_portal::services::{AuthService, CheckoutRequest, CheckoutService, ReportService};

#[tokio::test]
async fn test_report_counts_visitors_orders_and_revenue() {
    let mut backend = TestBackend::new();
    let ticket = backend.add_product(3, "Zion Day Ticket", Some("Zion"), 2000);
    let hoodie = backend.add_product(4, "Park Hoodie", None, 5500);

    let auth = AuthService::new(&backend);
    let alice = auth
        .register("Alice", "alice@example.com", "hunter2hunter2")
        .await
        .unwrap();
    let bob = auth
        .register("Bob", "bob@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let checkout = CheckoutService::new(&backend, &backend, &backend, CheckoutPolicy::default());
    for (visitor, product, quantity) in [(alice.id, ticket, 2), (bob.id, hoodie, 1)] {
        checkout
            .checkout(CheckoutRequest {
                visitor_id: Some(visitor),
                cart: vec![CartLine {
                    product_id: product,
                    quantity,
                }],
                payment_method: PaymentMethod::Dummy,
                visit_date: Some("2025-06-01".to_owned()),
                payment: PaymentDetails::default(),
            })
            .await
            .unwrap();
    }

    let report = ReportService::new(&backend, &backend).summary().await.unwrap();

    assert_eq!(report.total_visitors, 2);
    assert_eq!(report.total_orders, 2);
    // 2 * 20.00 + 55.00 = 95.00
    assert_eq!(report.total_revenue, Money::from_cents(9500));
    assert_eq!(report.orders.len(), 2);
}

#[tokio::test]
async fn test_report_serializes_camel_case() {
    let backend = TestBackend::new();
    let report = ReportService::new(&backend, &backend).summary().await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["totalVisitors"], 0);
    assert_eq!(json["totalOrders"], 0);
    assert!(json["totalRevenue"].is_string() || json["totalRevenue"].is_number());
}

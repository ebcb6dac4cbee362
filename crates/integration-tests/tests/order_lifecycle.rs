//! Order lifecycle scenarios: history, cancel, reschedule.

#![allow(clippy::unwrap_used)]

use trailpass_core::{Money, OrderId, OrderStatus, PaymentMethod, VisitorId};
use trailpass_integration_tests::TestBackend;
use trailpass_portal::config::CheckoutPolicy;
use trailpass_portal::models::CartLine;
use trailpass_portal::payment::PaymentDetails;
use trailpass_portal::services::{
    AuthService, CheckoutRequest, CheckoutService, OrderActionError, OrderService,
};

async fn visitor_with_order(backend: &TestBackend) -> (VisitorId, OrderId) {
    let auth = AuthService::new(backend);
    let visitor = auth
        .register("Alice", "alice@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let checkout = CheckoutService::new(backend, backend, backend, CheckoutPolicy::default());
    let receipt = checkout
        .checkout(CheckoutRequest {
            visitor_id: Some(visitor.id),
            cart: vec![CartLine {
                product_id: trailpass_core::ProductId::new(3),
                quantity: 2,
            }],
            payment_method: PaymentMethod::Dummy,
            visit_date: Some("2025-06-01".to_owned()),
            payment: PaymentDetails::default(),
        })
        .await
        .unwrap();

    (visitor.id, receipt.order.id)
}

fn seeded_backend() -> TestBackend {
    let mut backend = TestBackend::new();
    backend.add_product(3, "Zion Day Ticket", Some("Zion"), 2000);
    backend
}

#[tokio::test]
async fn test_history_lists_newest_first() {
    let backend = seeded_backend();
    let (alice, first_order) = visitor_with_order(&backend).await;

    let checkout = CheckoutService::new(&backend, &backend, &backend, CheckoutPolicy::default());
    let second = checkout
        .checkout(CheckoutRequest {
            visitor_id: Some(alice),
            cart: vec![CartLine {
                product_id: trailpass_core::ProductId::new(3),
                quantity: 1,
            }],
            payment_method: PaymentMethod::Dummy,
            visit_date: Some("2025-07-04".to_owned()),
            payment: PaymentDetails::default(),
        })
        .await
        .unwrap();

    let service = OrderService::new(&backend);
    let history = service.history(alice).await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.order.id);
    assert_eq!(history[1].id, first_order);
}

#[tokio::test]
async fn test_cancel_then_double_cancel() {
    let backend = seeded_backend();
    let (alice, order) = visitor_with_order(&backend).await;
    let service = OrderService::new(&backend);

    service.cancel(alice, order).await.unwrap();
    assert_eq!(
        backend.order(order).unwrap().status,
        OrderStatus::Cancelled
    );

    let second = service.cancel(alice, order).await;
    assert!(matches!(second, Err(OrderActionError::NotCancellable)));
}

#[tokio::test]
async fn test_cancel_requires_owner() {
    let backend = seeded_backend();
    let (_alice, order) = visitor_with_order(&backend).await;
    let service = OrderService::new(&backend);

    let stranger = VisitorId::new(999);
    let result = service.cancel(stranger, order).await;

    assert!(matches!(result, Err(OrderActionError::NotCancellable)));
    assert_eq!(
        backend.order(order).unwrap().status,
        OrderStatus::Confirmed
    );
}

#[tokio::test]
async fn test_reschedule_moves_visit_date() {
    let backend = seeded_backend();
    let (alice, order) = visitor_with_order(&backend).await;
    let service = OrderService::new(&backend);

    service.reschedule(alice, order, "2025-08-15").await.unwrap();

    let stored = backend.order(order).unwrap();
    assert_eq!(stored.visit_date, "2025-08-15".parse().unwrap());
    assert_eq!(stored.status, OrderStatus::Confirmed);
    // The locked total is untouched by a reschedule.
    assert_eq!(stored.total_amount, Money::from_cents(4000));
}

#[tokio::test]
async fn test_reschedule_rejects_bad_date_and_cancelled_order() {
    let backend = seeded_backend();
    let (alice, order) = visitor_with_order(&backend).await;
    let service = OrderService::new(&backend);

    let bad_date = service.reschedule(alice, order, "not-a-date").await;
    assert!(matches!(bad_date, Err(OrderActionError::InvalidVisitDate)));

    service.cancel(alice, order).await.unwrap();
    let after_cancel = service.reschedule(alice, order, "2025-08-15").await;
    assert!(matches!(
        after_cancel,
        Err(OrderActionError::NotReschedulable)
    ));
}

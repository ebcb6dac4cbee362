//! End-to-end checkout scenarios over the in-memory backend.
//!
//! Exercises the real services (auth, checkout) wired to [`TestBackend`],
//! covering the full path from registration to a persisted order.

#![allow(clippy::unwrap_used)]

use trailpass_core::{Money, PaymentMethod, VisitorId};
use trailpass_integration_tests::TestBackend;
use trailpass_portal::config::CheckoutPolicy;
use trailpass_portal::models::CartLine;
use trailpass_portal::payment::PaymentDetails;
use trailpass_portal::services::{AuthService, CheckoutError, CheckoutRequest, CheckoutService};

fn checkout_service(backend: &TestBackend) -> CheckoutService<&TestBackend, &TestBackend, &TestBackend> {
    CheckoutService::new(backend, backend, backend, CheckoutPolicy::default())
}

async fn register_alice(backend: &TestBackend) -> VisitorId {
    let auth = AuthService::new(backend);
    let visitor = auth
        .register("Alice", "alice@example.com", "hunter2hunter2")
        .await
        .unwrap();
    visitor.id
}

fn request(
    visitor_id: Option<VisitorId>,
    cart: Vec<CartLine>,
    payment_method: PaymentMethod,
) -> CheckoutRequest {
    CheckoutRequest {
        visitor_id,
        cart,
        payment_method,
        visit_date: Some("2025-06-01".to_owned()),
        payment: PaymentDetails::default(),
    }
}

#[tokio::test]
async fn test_register_then_checkout_persists_one_confirmed_order() {
    let mut backend = TestBackend::new();
    let ticket = backend.add_product(3, "Zion Day Ticket", Some("Zion"), 2000);
    let alice = register_alice(&backend).await;

    let receipt = checkout_service(&backend)
        .checkout(request(
            Some(alice),
            vec![CartLine {
                product_id: ticket,
                quantity: 2,
            }],
            PaymentMethod::Dummy,
        ))
        .await
        .unwrap();

    assert_eq!(receipt.message, "Dummy payment accepted for $40.00");
    assert_eq!(receipt.order.total_amount, Money::from_cents(4000));
    assert_eq!(receipt.order.items.len(), 1);
    assert_eq!(receipt.order.items[0].quantity, 2);
    assert_eq!(receipt.order.items[0].locked_price, Money::from_cents(2000));
    assert_eq!(
        receipt.order.visit_date,
        "2025-06-01".parse().unwrap()
    );
    assert_eq!(backend.order_count(), 1);
}

#[tokio::test]
async fn test_quantity_over_limit_rejected_and_nothing_persisted() {
    let mut backend = TestBackend::new();
    let ticket = backend.add_product(3, "Zion Day Ticket", Some("Zion"), 2000);
    let alice = register_alice(&backend).await;

    let result = checkout_service(&backend)
        .checkout(request(
            Some(alice),
            vec![CartLine {
                product_id: ticket,
                quantity: 11,
            }],
            PaymentMethod::Dummy,
        ))
        .await;

    assert!(matches!(
        result,
        Err(CheckoutError::QuantityLimitExceeded { limit: 10 })
    ));
    assert_eq!(backend.order_count(), 0);
}

#[tokio::test]
async fn test_declined_card_persists_nothing() {
    let mut backend = TestBackend::new();
    let ticket = backend.add_product(1, "Yellowstone Day Ticket", Some("Yellowstone"), 2500);
    let alice = register_alice(&backend).await;

    let mut req = request(
        Some(alice),
        vec![CartLine {
            product_id: ticket,
            quantity: 1,
        }],
        PaymentMethod::Card,
    );
    req.payment.card_number = Some("4111111111110000".to_owned());

    let result = checkout_service(&backend).checkout(req).await;

    assert!(matches!(result, Err(CheckoutError::PaymentDeclined(ref m))
        if m == "Card declined (simulated failure)."));
    assert_eq!(backend.order_count(), 0);
}

#[tokio::test]
async fn test_unknown_product_rejected_before_payment() {
    let mut backend = TestBackend::new();
    let ticket = backend.add_product(1, "Yellowstone Day Ticket", Some("Yellowstone"), 2500);
    let alice = register_alice(&backend).await;

    let mut cart = vec![CartLine {
        product_id: ticket,
        quantity: 1,
    }];
    cart.push(CartLine {
        product_id: trailpass_core::ProductId::new(999),
        quantity: 1,
    });

    let result = checkout_service(&backend)
        .checkout(request(Some(alice), cart, PaymentMethod::Dummy))
        .await;

    assert!(matches!(result, Err(CheckoutError::InvalidCartItem)));
    assert_eq!(backend.order_count(), 0);
}

#[tokio::test]
async fn test_anonymous_checkout_rejected() {
    let mut backend = TestBackend::new();
    let ticket = backend.add_product(1, "Yellowstone Day Ticket", Some("Yellowstone"), 2500);

    let result = checkout_service(&backend)
        .checkout(request(
            None,
            vec![CartLine {
                product_id: ticket,
                quantity: 1,
            }],
            PaymentMethod::Dummy,
        ))
        .await;

    assert!(matches!(result, Err(CheckoutError::Unauthenticated)));
}

#[tokio::test]
async fn test_mixed_cart_totals_are_exact() {
    let mut backend = TestBackend::new();
    let ticket = backend.add_product(3, "Zion Day Ticket", Some("Zion"), 2000);
    let hoodie = backend.add_product(4, "Park Hoodie", None, 5500);
    let stickers = backend.add_product(5, "Sticker Pack", None, 800);
    let alice = register_alice(&backend).await;

    let receipt = checkout_service(&backend)
        .checkout(request(
            Some(alice),
            vec![
                CartLine {
                    product_id: ticket,
                    quantity: 2,
                },
                CartLine {
                    product_id: hoodie,
                    quantity: 1,
                },
                CartLine {
                    product_id: stickers,
                    quantity: 3,
                },
            ],
            PaymentMethod::Wallet,
        ))
        .await
        .unwrap();

    // 2 * 20.00 + 55.00 + 3 * 8.00 = 119.00
    assert_eq!(receipt.order.total_amount, Money::from_cents(11900));
    assert_eq!(
        receipt.message,
        "Processed wallet payment of $119.00 from default-wallet"
    );
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected_case_insensitively() {
    let backend = TestBackend::new();
    let auth = AuthService::new(&backend);

    auth.register("Alice", "alice@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let result = auth
        .register("Alice Again", "ALICE@Example.COM", "hunter2hunter2")
        .await;
    assert!(matches!(
        result,
        Err(trailpass_portal::services::AuthError::EmailTaken)
    ));
}

#[tokio::test]
async fn test_login_roundtrip() {
    let backend = TestBackend::new();
    let auth = AuthService::new(&backend);

    let registered = auth
        .register("Alice", "alice@example.com", "hunter2hunter2")
        .await
        .unwrap();

    let logged_in = auth
        .login("Alice@example.com", "hunter2hunter2")
        .await
        .unwrap();
    assert_eq!(logged_in.id, registered.id);

    let wrong = auth.login("alice@example.com", "wrong password").await;
    assert!(matches!(
        wrong,
        Err(trailpass_portal::services::AuthError::InvalidCredentials)
    ));
}

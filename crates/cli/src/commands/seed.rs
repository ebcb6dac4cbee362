//! Catalog seed command.
//!
//! Inserts the baseline parks and products with fixed ids. Idempotent: rows
//! that already exist are left untouched, and the id sequences are bumped
//! past the fixed ids so later inserts never collide.

use rust_decimal::Decimal;

use trailpass_core::ProductKind;

use super::CliError;

struct SeedPark {
    id: i64,
    name: &'static str,
    location: &'static str,
}

struct SeedProduct {
    id: i64,
    name: &'static str,
    kind: ProductKind,
    unit_price: Decimal,
    park_id: Option<i64>,
}

const PARKS: [SeedPark; 3] = [
    SeedPark {
        id: 1,
        name: "Yellowstone",
        location: "Wyoming",
    },
    SeedPark {
        id: 2,
        name: "Yosemite",
        location: "California",
    },
    SeedPark {
        id: 3,
        name: "Zion",
        location: "Utah",
    },
];

fn products() -> [SeedProduct; 5] {
    [
        SeedProduct {
            id: 1,
            name: "Yellowstone Day Ticket",
            kind: ProductKind::Ticket,
            unit_price: Decimal::new(25, 0),
            park_id: Some(1),
        },
        SeedProduct {
            id: 2,
            name: "Yosemite Day Ticket",
            kind: ProductKind::Ticket,
            unit_price: Decimal::new(30, 0),
            park_id: Some(2),
        },
        SeedProduct {
            id: 3,
            name: "Zion Day Ticket",
            kind: ProductKind::Ticket,
            unit_price: Decimal::new(20, 0),
            park_id: Some(3),
        },
        SeedProduct {
            id: 4,
            name: "Park Hoodie",
            kind: ProductKind::Merch,
            unit_price: Decimal::new(55, 0),
            park_id: None,
        },
        SeedProduct {
            id: 5,
            name: "Sticker Pack",
            kind: ProductKind::Merch,
            unit_price: Decimal::new(8, 0),
            park_id: None,
        },
    ]
}

/// Seed the catalog with the baseline parks and products.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Seeding parks...");
    for park in PARKS {
        sqlx::query(
            r"
            INSERT INTO park (id, name, location)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(park.id)
        .bind(park.name)
        .bind(park.location)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeding products...");
    for product in products() {
        sqlx::query(
            r"
            INSERT INTO product (id, name, kind, unit_price, park_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(product.id)
        .bind(product.name)
        .bind(product.kind.as_str())
        .bind(product.unit_price)
        .bind(product.park_id)
        .execute(&pool)
        .await?;
    }

    // Bump the sequences past the fixed ids.
    sqlx::query("SELECT setval('park_id_seq', (SELECT MAX(id) FROM park))")
        .execute(&pool)
        .await?;
    sqlx::query("SELECT setval('product_id_seq', (SELECT MAX(id) FROM product))")
        .execute(&pool)
        .await?;

    tracing::info!("Seed complete!");
    Ok(())
}

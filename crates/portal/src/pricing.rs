//! Order building: pure pricing of a validated cart.
//!
//! Combines cart lines with their resolved catalog records into price-locked
//! lines and an exact fixed-point total. No side effects; the checkout
//! orchestrator owns all I/O around this.

use std::collections::HashMap;

use trailpass_core::{Money, ProductId};

use crate::models::{CartLine, CatalogRecord, PricedLine};

/// A cart priced against the catalog: locked lines plus their exact total.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub total: Money,
}

/// Total requested quantity across all cart lines.
#[must_use]
pub fn total_quantity(cart: &[CartLine]) -> u64 {
    cart.iter().map(|line| u64::from(line.quantity)).sum()
}

/// Price a cart against resolved catalog records.
///
/// Each line locks the record's current unit price and denormalized display
/// fields; the total is the exact sum of `unit price x quantity` over all
/// lines. Returns `None` if any line has no matching record - the caller has
/// already compared resolution counts, so this is a belt-and-braces signal
/// for the same `InvalidCartItem` failure.
#[must_use]
pub fn price_cart(cart: &[CartLine], records: &[CatalogRecord]) -> Option<PricedCart> {
    let by_id: HashMap<ProductId, &CatalogRecord> = records
        .iter()
        .map(|record| (record.product_id, record))
        .collect();

    let mut lines = Vec::with_capacity(cart.len());
    for cart_line in cart {
        let record = by_id.get(&cart_line.product_id)?;
        lines.push(PricedLine {
            product_id: record.product_id,
            name: record.name.clone(),
            park_name: record.park_name.clone(),
            quantity: cart_line.quantity,
            unit_price: record.unit_price,
        });
    }

    let total = lines.iter().map(PricedLine::line_total).sum();
    Some(PricedCart { lines, total })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::Rng;

    fn record(id: i64, name: &str, cents: u64) -> CatalogRecord {
        CatalogRecord {
            product_id: ProductId::new(id),
            name: name.to_owned(),
            park_name: None,
            unit_price: Money::from_cents(cents),
        }
    }

    fn line(id: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            quantity,
        }
    }

    #[test]
    fn test_total_quantity() {
        let cart = [line(1, 1), line(2, 3), line(3, 2)];
        assert_eq!(total_quantity(&cart), 6);
    }

    #[test]
    fn test_price_cart_locks_price_and_sums() {
        let records = [record(1, "Day Ticket", 1000), record(2, "Sticker Pack", 500)];
        let cart = [line(1, 2), line(2, 1)];

        let priced = price_cart(&cart, &records).unwrap();
        assert_eq!(priced.lines.len(), 2);
        assert_eq!(priced.total, Money::from_cents(2500));
        assert_eq!(priced.lines[0].unit_price, Money::from_cents(1000));
        assert_eq!(priced.lines[0].name, "Day Ticket");
    }

    #[test]
    fn test_price_cart_missing_record_is_none() {
        let records = [record(1, "Day Ticket", 1000)];
        let cart = [line(1, 1), line(99, 1)];
        assert!(price_cart(&cart, &records).is_none());
    }

    #[test]
    fn test_total_equals_line_sum_over_random_carts() {
        // The price-integrity invariant: for any cart, the computed total is
        // exactly the sum of the line totals, with no drift across repeated
        // additions. Cent-denominated prices make any float rounding obvious.
        let mut rng = rand::rng();

        for _ in 0..100 {
            let line_count = rng.random_range(1..=20);
            let mut records = Vec::new();
            let mut cart = Vec::new();
            for id in 0..line_count {
                let cents = rng.random_range(1..=99_999);
                records.push(record(id, "item", cents));
                cart.push(line(id, rng.random_range(1..=50)));
            }

            let priced = price_cart(&cart, &records).unwrap();
            let line_sum: Money = priced.lines.iter().map(PricedLine::line_total).sum();
            assert_eq!(priced.total, line_sum);

            // Cross-check against integer cent arithmetic.
            let cents_sum: u64 = priced
                .lines
                .iter()
                .map(|l| {
                    let cents = (l.unit_price.amount() * rust_decimal::Decimal::from(100))
                        .try_into()
                        .unwrap_or(0u64);
                    cents * u64::from(l.quantity)
                })
                .sum();
            assert_eq!(priced.total, Money::from_cents(cents_sum));
        }
    }
}

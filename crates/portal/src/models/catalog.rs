//! Catalog domain types: parks and the products sold against them.
//!
//! Catalog rows are immutable reference data as far as checkout is concerned;
//! a price change here never retroactively alters an existing order.

use serde::Serialize;

use trailpass_core::{Money, ParkId, ProductId, ProductKind};

/// A national park.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    pub id: ParkId,
    pub name: String,
    pub location: String,
}

/// A sellable catalog entry: a park day ticket or merchandise.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub kind: ProductKind,
    pub unit_price: Money,
    /// Owning park, for tickets.
    pub park_id: Option<ParkId>,
    pub park_name: Option<String>,
}

/// The authoritative catalog answer for one requested product id.
///
/// This is what checkout locks into an order line: the current price plus
/// the descriptive fields denormalized at the moment of purchase.
#[derive(Debug, Clone)]
pub struct CatalogRecord {
    pub product_id: ProductId,
    pub name: String,
    pub park_name: Option<String>,
    pub unit_price: Money,
}

//! Domain models for the portal.
//!
//! These types represent validated domain objects separate from database row
//! types. DTO counterparts (the JSON shapes the API serves) live next to the
//! models they mirror.

pub mod catalog;
pub mod order;
pub mod visitor;

pub use catalog::{CatalogRecord, Park, Product};
pub use order::{CartLine, NewOrder, Order, OrderDto, OrderItemDto, OrderLine, PricedLine};
pub use visitor::{Visitor, VisitorProfile};

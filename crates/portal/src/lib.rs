//! Trailpass Portal - booking portal library.
//!
//! The portal exposes a JSON API for visitor registration, catalog browsing,
//! checkout, order management, and an admin revenue report. The checkout
//! pipeline (validate cart, price-lock against the catalog, run a payment
//! strategy, atomically persist) lives in [`services::checkout`] and is
//! generic over the [`store`] contracts so it can be exercised without a
//! database.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Store contracts are consumed via generics only; no dyn dispatch.
#![allow(async_fn_in_trait)]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod payment;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

//! Application services.
//!
//! - [`checkout`] - the checkout orchestrator (validate, price, charge, persist)
//! - [`orders`] - order history, cancel, reschedule
//! - [`auth`] - visitor registration and login
//! - [`report`] - admin revenue/order rollup

pub mod auth;
pub mod checkout;
pub mod orders;
pub mod report;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutRequest, CheckoutService};
pub use orders::{OrderActionError, OrderService};
pub use report::{ReportService, SystemReport};

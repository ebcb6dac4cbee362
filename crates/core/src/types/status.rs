//! Status and tag enums for orders, payments, and catalog entries.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The machine is `PENDING -> CONFIRMED -> CANCELLED` with `CANCELLED`
/// terminal. In practice orders are persisted directly as `CONFIRMED` once
/// the payment simulation approves; `PENDING` exists for the state machine
/// but is never observed in the store. Rescheduling is a side transition
/// valid only while `CONFIRMED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status may be cancelled.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Whether an order in this status may have its visit date changed.
    #[must_use]
    pub const fn is_reschedulable(self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Stable string form, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment method tag selecting a payment strategy at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Wallet,
    #[default]
    Dummy,
}

impl PaymentMethod {
    /// Map a raw tag to a payment method.
    ///
    /// Unknown or missing tags fall back to [`PaymentMethod::Dummy`]; tag
    /// selection is deliberately total so checkout never fails on the tag
    /// itself.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "CARD" => Self::Card,
            "WALLET" => Self::Wallet,
            _ => Self::Dummy,
        }
    }

    /// Stable string form, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "CARD",
            Self::Wallet => "WALLET",
            Self::Dummy => "DUMMY",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(Self::Card),
            "WALLET" => Ok(Self::Wallet),
            "DUMMY" => Ok(Self::Dummy),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Kind of catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    /// Park entry ticket; carries an owning park.
    Ticket,
    /// Merchandise; not tied to a park.
    Merch,
}

impl ProductKind {
    /// Stable string form, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ticket => "TICKET",
            Self::Merch => "MERCH",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TICKET" => Ok(Self::Ticket),
            "MERCH" => Ok(Self::Merch),
            _ => Err(format!("invalid product kind: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(OrderStatus::Confirmed.is_cancellable());
        assert!(OrderStatus::Confirmed.is_reschedulable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_reschedulable());
        assert!(!OrderStatus::Pending.is_cancellable());
    }

    #[test]
    fn test_status_str_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_payment_method_from_tag_falls_back_to_dummy() {
        assert_eq!(PaymentMethod::from_tag("CARD"), PaymentMethod::Card);
        assert_eq!(PaymentMethod::from_tag("WALLET"), PaymentMethod::Wallet);
        assert_eq!(PaymentMethod::from_tag("DUMMY"), PaymentMethod::Dummy);
        assert_eq!(PaymentMethod::from_tag("BITCOIN"), PaymentMethod::Dummy);
        assert_eq!(PaymentMethod::from_tag(""), PaymentMethod::Dummy);
    }

    #[test]
    fn test_serde_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Confirmed).unwrap(),
            "\"CONFIRMED\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Wallet).unwrap(),
            "\"WALLET\""
        );
        assert_eq!(
            serde_json::to_string(&ProductKind::Ticket).unwrap(),
            "\"TICKET\""
        );
    }
}

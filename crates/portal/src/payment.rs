//! Payment strategies: a closed set of simulated payment methods.
//!
//! Each strategy exposes the single capability `execute(amount)` and is a
//! pure simulation - synchronous, no network, no side effects. Decline
//! behavior is driven by deterministic sentinels (a reserved card suffix, a
//! "fail" marker in the wallet id) so demos and tests are reproducible.
//! Extending the set means adding a variant and a match arm.

use serde::Deserialize;

use trailpass_core::{Money, PaymentMethod};

/// Reserved card suffix that always declines.
const DECLINED_CARD_SUFFIX: &str = "0000";

/// Wallet id marker that always declines (matched case-insensitively).
const FAILING_WALLET_MARKER: &str = "fail";

// Placeholders substituted for omitted payment details. Note the fallback
// card number ends in the declined suffix, so a CARD checkout without a card
// number is declined rather than silently charged.
const FALLBACK_CARD_NUMBER: &str = "0000000000000000";
const FALLBACK_CVV: &str = "000";
const FALLBACK_WALLET_ID: &str = "default-wallet";

/// Method-specific details supplied with a checkout request.
///
/// Every field is optional; missing values are substituted with fixed
/// placeholders instead of failing validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: Option<String>,
    pub cvv: Option<String>,
    pub wallet_id: Option<String>,
}

/// Outcome of executing a payment strategy.
///
/// A decline is a normal, non-error outcome of the simulation; both arms
/// carry a short user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved(String),
    Declined(String),
}

impl PaymentOutcome {
    /// Whether the payment was approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }
}

/// An executable payment attempt.
#[derive(Debug, Clone)]
pub enum PaymentStrategy {
    Card { number: String, cvv: String },
    Wallet { wallet_id: String },
    Dummy,
}

impl PaymentStrategy {
    /// Select a strategy for a payment method, substituting placeholders for
    /// any missing details. Pure: the same inputs always select the same
    /// strategy.
    #[must_use]
    pub fn select(method: PaymentMethod, details: &PaymentDetails) -> Self {
        match method {
            PaymentMethod::Card => Self::Card {
                number: details
                    .card_number
                    .clone()
                    .unwrap_or_else(|| FALLBACK_CARD_NUMBER.to_owned()),
                cvv: details
                    .cvv
                    .clone()
                    .unwrap_or_else(|| FALLBACK_CVV.to_owned()),
            },
            PaymentMethod::Wallet => Self::Wallet {
                wallet_id: details
                    .wallet_id
                    .clone()
                    .unwrap_or_else(|| FALLBACK_WALLET_ID.to_owned()),
            },
            PaymentMethod::Dummy => Self::Dummy,
        }
    }

    /// Execute the simulated payment for `amount`.
    #[must_use]
    pub fn execute(&self, amount: Money) -> PaymentOutcome {
        match self {
            Self::Card { number, .. } => {
                let number = number.trim();
                if number.ends_with(DECLINED_CARD_SUFFIX) {
                    return PaymentOutcome::Declined(
                        "Card declined (simulated failure).".to_owned(),
                    );
                }
                let last4 = number
                    .get(number.len().saturating_sub(4)..)
                    .unwrap_or(number);
                PaymentOutcome::Approved(format!(
                    "Processed card payment of ${amount} ending with {last4}"
                ))
            }
            Self::Wallet { wallet_id } => {
                if wallet_id.trim().to_lowercase().contains(FAILING_WALLET_MARKER) {
                    return PaymentOutcome::Declined(
                        "Wallet payment rejected (simulated failure).".to_owned(),
                    );
                }
                PaymentOutcome::Approved(format!(
                    "Processed wallet payment of ${amount} from {wallet_id}"
                ))
            }
            Self::Dummy => {
                PaymentOutcome::Approved(format!("Dummy payment accepted for ${amount}"))
            }
        }
    }
}

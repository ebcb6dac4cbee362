//! Visitor domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use trailpass_core::{Email, VisitorId};

/// A registered visitor (domain type).
///
/// The credential hash stays in the repository layer and never leaves it.
#[derive(Debug, Clone)]
pub struct Visitor {
    /// Unique visitor ID.
    pub id: VisitorId,
    /// Display name.
    pub full_name: String,
    /// Normalized (lowercased) email address; unique case-insensitively.
    pub email: Email,
    /// When the visitor registered.
    pub created_at: DateTime<Utc>,
}

/// The visitor shape returned by the auth endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorProfile {
    pub id: VisitorId,
    pub full_name: String,
    pub email: Email,
}

impl From<Visitor> for VisitorProfile {
    fn from(visitor: Visitor) -> Self {
        Self {
            id: visitor.id,
            full_name: visitor.full_name,
            email: visitor.email,
        }
    }
}

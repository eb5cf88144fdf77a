//! The user record products and forum entries reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A marketplace participant. Referenced by identity from products (as the
/// seller) and from forum records (as the author); never owned by either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Uuid,
    pub display_name: String,
    /// Optional home city; denormalized onto products at write time.
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

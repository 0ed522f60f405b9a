use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An address owned by exactly one contact via `contact_id`; its access
/// scope is inherited transitively from the contact's owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub contact_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A contact owned by exactly one user via `username`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

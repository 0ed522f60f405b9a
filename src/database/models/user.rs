use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account. `token` is the single active session credential;
/// NULL means logged out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub token: Option<String>,
}

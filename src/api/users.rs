use serde::{Deserialize, Serialize};

use crate::api::{optional, require};
use crate::database::models::User;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl RegisterUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("username", &self.username, 100)?;
        require("password", &self.password, 100)?;
        require("name", &self.name, 100)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
}

impl LoginUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("username", &self.username, 100)?;
        require("password", &self.password, 100)?;
        Ok(())
    }
}

/// Profile update is genuinely partial: each field independently optional,
/// unsupplied fields keep their prior value.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        optional("name", &self.name, 100)?;
        optional("password", &self.password, 100)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
            token: None,
        }
    }
}

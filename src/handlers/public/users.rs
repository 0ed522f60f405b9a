use axum::Json;

use crate::api::users::{LoginUserRequest, RegisterUserRequest, UserResponse};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_service;

/// POST /api/users - register a new account
pub async fn register(Json(request): Json<RegisterUserRequest>) -> ApiResult<UserResponse> {
    let result = user_service::register(request).await?;
    Ok(ApiResponse::created(result))
}

/// POST /api/users/login - authenticate and receive a fresh session token
pub async fn login(Json(request): Json<LoginUserRequest>) -> ApiResult<UserResponse> {
    let result = user_service::login(request).await?;
    Ok(ApiResponse::success(result))
}

use axum::Json;

use crate::api::users::{UpdateUserRequest, UserResponse};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::user_service;

/// GET /api/users/current - profile of the authenticated user
pub async fn current(CurrentUser(user): CurrentUser) -> ApiResult<UserResponse> {
    Ok(ApiResponse::success(user_service::current(&user)))
}

/// PATCH /api/users/current - partial profile update
pub async fn update(
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let result = user_service::update(user, request).await?;
    Ok(ApiResponse::success(result))
}

/// DELETE /api/users/current - logout (clears the stored token)
pub async fn logout(CurrentUser(user): CurrentUser) -> ApiResult<bool> {
    user_service::logout(&user).await?;
    Ok(ApiResponse::success(true))
}

use axum::extract::Path;
use axum::Json;

use crate::api::addresses::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::address_service;

/// POST /api/contacts/:contact_id/addresses
pub async fn create(
    CurrentUser(user): CurrentUser,
    Path(contact_id): Path<i64>,
    Json(request): Json<CreateAddressRequest>,
) -> ApiResult<AddressResponse> {
    let result = address_service::create(&user, contact_id, request).await?;
    Ok(ApiResponse::created(result))
}

/// GET /api/contacts/:contact_id/addresses - list the contact's addresses
pub async fn list(
    CurrentUser(user): CurrentUser,
    Path(contact_id): Path<i64>,
) -> ApiResult<Vec<AddressResponse>> {
    let result = address_service::list(&user, contact_id).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/contacts/:contact_id/addresses/:address_id
pub async fn get(
    CurrentUser(user): CurrentUser,
    Path((contact_id, address_id)): Path<(i64, i64)>,
) -> ApiResult<AddressResponse> {
    let result = address_service::get(&user, contact_id, address_id).await?;
    Ok(ApiResponse::success(result))
}

/// PUT /api/contacts/:contact_id/addresses/:address_id - full-field replace
pub async fn update(
    CurrentUser(user): CurrentUser,
    Path((contact_id, address_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateAddressRequest>,
) -> ApiResult<AddressResponse> {
    let result = address_service::update(&user, contact_id, address_id, request).await?;
    Ok(ApiResponse::success(result))
}

/// DELETE /api/contacts/:contact_id/addresses/:address_id
pub async fn remove(
    CurrentUser(user): CurrentUser,
    Path((contact_id, address_id)): Path<(i64, i64)>,
) -> ApiResult<bool> {
    address_service::remove(&user, contact_id, address_id).await?;
    Ok(ApiResponse::success(true))
}

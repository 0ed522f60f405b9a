use axum::extract::{Path, Query};
use axum::Json;

use crate::api::contacts::{
    ContactResponse, CreateContactRequest, SearchContactQuery, SearchContactRequest,
    UpdateContactRequest,
};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::contact_service;

/// POST /api/contacts - create a contact owned by the caller
pub async fn create(
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateContactRequest>,
) -> ApiResult<ContactResponse> {
    let result = contact_service::create(&user, request).await?;
    Ok(ApiResponse::created(result))
}

/// GET /api/contacts - search the caller's contacts with pagination
pub async fn search(
    CurrentUser(user): CurrentUser,
    Query(query): Query<SearchContactQuery>,
) -> ApiResult<Vec<ContactResponse>> {
    let request = SearchContactRequest::from_query(query)?;
    let (contacts, paging) = contact_service::search(&user, request).await?;
    Ok(ApiResponse::paged(contacts, paging))
}

/// GET /api/contacts/:contact_id
pub async fn get(
    CurrentUser(user): CurrentUser,
    Path(contact_id): Path<i64>,
) -> ApiResult<ContactResponse> {
    let result = contact_service::get(&user, contact_id).await?;
    Ok(ApiResponse::success(result))
}

/// PUT /api/contacts/:contact_id - full-field replace
pub async fn update(
    CurrentUser(user): CurrentUser,
    Path(contact_id): Path<i64>,
    Json(request): Json<UpdateContactRequest>,
) -> ApiResult<ContactResponse> {
    let result = contact_service::update(&user, contact_id, request).await?;
    Ok(ApiResponse::success(result))
}

/// DELETE /api/contacts/:contact_id
pub async fn remove(
    CurrentUser(user): CurrentUser,
    Path(contact_id): Path<i64>,
) -> ApiResult<bool> {
    contact_service::remove(&user, contact_id).await?;
    Ok(ApiResponse::success(true))
}

use crate::api::addresses::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use crate::database::models::{Address, User};
use crate::database::{DatabaseError, DatabaseManager, Repository};
use crate::error::ApiError;
use crate::filter::{Filter, SortDirection};
use crate::services::contact_service;

/// Every address operation walks the ownership chain: the parent contact must
/// resolve for the caller's username before the address is even looked at.
pub async fn create(
    user: &User,
    contact_id: i64,
    request: CreateAddressRequest,
) -> Result<AddressResponse, ApiError> {
    tracing::debug!("AddressService.create({}, {})", user.username, contact_id);
    request.validate()?;

    let contact = contact_service::find_contact(&user.username, contact_id).await?;

    let pool = DatabaseManager::pool().await?;
    let address = sqlx::query_as::<_, Address>(
        "INSERT INTO addresses (contact_id, street, city, province, country, postal_code) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(contact.id)
    .bind(&request.street)
    .bind(&request.city)
    .bind(&request.province)
    .bind(&request.country)
    .bind(&request.postal_code)
    .fetch_one(&pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(AddressResponse::from(address))
}

/// Second step of the chain walk: compound (id, contact_id) lookup.
pub async fn find_address(contact_id: i64, address_id: i64) -> Result<Address, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let mut filter = Filter::new("addresses")?;
    filter.and_eq("id", address_id)?.and_eq("contact_id", contact_id)?;

    Repository::<Address>::new(pool)
        .select_optional(&filter)
        .await?
        .ok_or_else(|| ApiError::not_found("Address not found"))
}

pub async fn get(user: &User, contact_id: i64, address_id: i64) -> Result<AddressResponse, ApiError> {
    tracing::debug!(
        "AddressService.get({}, {}, {})",
        user.username,
        contact_id,
        address_id
    );

    contact_service::find_contact(&user.username, contact_id).await?;
    let address = find_address(contact_id, address_id).await?;

    Ok(AddressResponse::from(address))
}

pub async fn update(
    user: &User,
    contact_id: i64,
    address_id: i64,
    request: UpdateAddressRequest,
) -> Result<AddressResponse, ApiError> {
    tracing::debug!(
        "AddressService.update({}, {}, {})",
        user.username,
        contact_id,
        address_id
    );
    request.validate()?;

    contact_service::find_contact(&user.username, contact_id).await?;
    let address = find_address(contact_id, address_id).await?;

    let pool = DatabaseManager::pool().await?;
    let address = sqlx::query_as::<_, Address>(
        "UPDATE addresses SET street = $1, city = $2, province = $3, country = $4, postal_code = $5 \
         WHERE id = $6 AND contact_id = $7 RETURNING *",
    )
    .bind(&request.street)
    .bind(&request.city)
    .bind(&request.province)
    .bind(&request.country)
    .bind(&request.postal_code)
    .bind(address.id)
    .bind(address.contact_id)
    .fetch_optional(&pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or_else(|| ApiError::not_found("Address not found"))?;

    Ok(AddressResponse::from(address))
}

pub async fn remove(
    user: &User,
    contact_id: i64,
    address_id: i64,
) -> Result<AddressResponse, ApiError> {
    tracing::debug!(
        "AddressService.remove({}, {}, {})",
        user.username,
        contact_id,
        address_id
    );

    contact_service::find_contact(&user.username, contact_id).await?;
    let address = find_address(contact_id, address_id).await?;

    let pool = DatabaseManager::pool().await?;
    let address = sqlx::query_as::<_, Address>(
        "DELETE FROM addresses WHERE id = $1 AND contact_id = $2 RETURNING *",
    )
    .bind(address.id)
    .bind(address.contact_id)
    .fetch_optional(&pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or_else(|| ApiError::not_found("Address not found"))?;

    Ok(AddressResponse::from(address))
}

pub async fn list(user: &User, contact_id: i64) -> Result<Vec<AddressResponse>, ApiError> {
    tracing::debug!("AddressService.list({}, {})", user.username, contact_id);

    contact_service::find_contact(&user.username, contact_id).await?;

    let pool = DatabaseManager::pool().await?;
    let mut filter = Filter::new("addresses")?;
    filter
        .and_eq("contact_id", contact_id)?
        .order_by("id", SortDirection::Asc)?;

    let addresses = Repository::<Address>::new(pool).select_all(&filter).await?;
    Ok(addresses.into_iter().map(AddressResponse::from).collect())
}

use crate::api::contacts::{
    ContactResponse, CreateContactRequest, SearchContactRequest, UpdateContactRequest,
};
use crate::database::models::{Contact, User};
use crate::database::{DatabaseError, DatabaseManager, Repository};
use crate::error::ApiError;
use crate::filter::{total_pages, Filter, SortDirection};
use crate::middleware::Paging;

pub async fn create(user: &User, request: CreateContactRequest) -> Result<ContactResponse, ApiError> {
    tracing::debug!("ContactService.create({})", user.username);
    request.validate()?;

    let pool = DatabaseManager::pool().await?;
    let contact = sqlx::query_as::<_, Contact>(
        "INSERT INTO contacts (username, first_name, last_name, email, phone) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&user.username)
    .bind(&request.first_name)
    .bind(&request.last_name)
    .bind(&request.email)
    .bind(&request.phone)
    .fetch_one(&pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(ContactResponse::from(contact))
}

/// Ownership resolver: one compound (id, owner) lookup. An absent row and a
/// row owned by someone else produce the same NotFound.
pub async fn find_contact(username: &str, contact_id: i64) -> Result<Contact, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let mut filter = Filter::new("contacts")?;
    filter.and_eq("id", contact_id)?.and_eq("username", username)?;

    Repository::<Contact>::new(pool)
        .select_optional(&filter)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))
}

pub async fn get(user: &User, contact_id: i64) -> Result<ContactResponse, ApiError> {
    tracing::debug!("ContactService.get({}, {})", user.username, contact_id);
    let contact = find_contact(&user.username, contact_id).await?;
    Ok(ContactResponse::from(contact))
}

/// Full-field replace. Resolution runs first; the update itself is keyed by
/// the same compound predicate, so a row deleted in between surfaces as
/// NotFound here rather than silently succeeding.
pub async fn update(
    user: &User,
    contact_id: i64,
    request: UpdateContactRequest,
) -> Result<ContactResponse, ApiError> {
    tracing::debug!("ContactService.update({}, {})", user.username, contact_id);
    request.validate()?;

    let contact = find_contact(&user.username, contact_id).await?;

    let pool = DatabaseManager::pool().await?;
    let contact = sqlx::query_as::<_, Contact>(
        "UPDATE contacts SET first_name = $1, last_name = $2, email = $3, phone = $4 \
         WHERE id = $5 AND username = $6 RETURNING *",
    )
    .bind(&request.first_name)
    .bind(&request.last_name)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(contact.id)
    .bind(&contact.username)
    .fetch_optional(&pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    Ok(ContactResponse::from(contact))
}

/// Delete exactly one row by the compound predicate; returns the prior state.
pub async fn remove(user: &User, contact_id: i64) -> Result<ContactResponse, ApiError> {
    tracing::debug!("ContactService.remove({}, {})", user.username, contact_id);

    let contact = find_contact(&user.username, contact_id).await?;

    let pool = DatabaseManager::pool().await?;
    let contact = sqlx::query_as::<_, Contact>(
        "DELETE FROM contacts WHERE id = $1 AND username = $2 RETURNING *",
    )
    .bind(contact.id)
    .bind(&contact.username)
    .fetch_optional(&pool)
    .await
    .map_err(DatabaseError::from)?
    .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    Ok(ContactResponse::from(contact))
}

/// Contact search: conjunctive filter over the caller's own contacts with
/// stable id-ordered pagination and a separate total count.
pub async fn search(
    user: &User,
    request: SearchContactRequest,
) -> Result<(Vec<ContactResponse>, Paging), ApiError> {
    tracing::debug!("ContactService.search({})", user.username);

    let mut filter = Filter::new("contacts")?;
    filter.and_eq("username", user.username.as_str())?;

    // Each present field adds one clause; absent fields add nothing
    if let Some(name) = &request.name {
        filter.and_contains_any(&["first_name", "last_name"], name)?;
    }
    if let Some(email) = &request.email {
        filter.and_contains("email", email)?;
    }
    if let Some(phone) = &request.phone {
        filter.and_contains("phone", phone)?;
    }

    filter
        .order_by("id", SortDirection::Asc)?
        .paginate(request.page, request.size)?;

    let pool = DatabaseManager::pool().await?;
    let repository = Repository::<Contact>::new(pool);

    let contacts = repository.select_all(&filter).await?;
    // Count runs over the same filter without pagination: the total matching
    // set, not the current page
    let count = repository.count(&filter).await?;

    let paging = Paging {
        current_page: request.page,
        total_page: total_pages(count, request.size),
        size: request.size,
    };

    Ok((contacts.into_iter().map(ContactResponse::from).collect(), paging))
}

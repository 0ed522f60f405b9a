use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::models::User;
use crate::database::{DatabaseManager, Repository};
use crate::error::ApiError;
use crate::filter::Filter;

/// Authenticated identity attached to the request by the token authenticator.
///
/// Handlers take this as an extractor; extraction is the access guard and
/// fails with 401 before any handler logic when no identity was attached.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Token authenticator middleware.
///
/// Resolves the raw `Authorization` header value (no scheme prefix) to a user
/// record via one store lookup and annotates the request with it. It never
/// rejects a request itself: an absent or unknown token just leaves the
/// request anonymous. Store failures during the lookup do propagate.
///
/// No caching - a login or logout must be visible on the very next request.
pub async fn authenticate(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = raw_token(&headers) {
        if let Some(user) = lookup_user_by_token(token).await? {
            request.extensions_mut().insert(CurrentUser(user));
        }
    }

    Ok(next.run(request).await)
}

fn raw_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .filter(|token| !token.is_empty())
}

async fn lookup_user_by_token(token: &str) -> Result<Option<User>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let mut filter = Filter::new("users")?;
    filter.and_eq("token", token)?;
    let user = Repository::<User>::new(pool).select_optional(&filter).await?;
    Ok(user)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}

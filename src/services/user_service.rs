use uuid::Uuid;

use crate::api::users::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse};
use crate::database::models::User;
use crate::database::{DatabaseError, DatabaseManager, Repository};
use crate::error::ApiError;
use crate::filter::Filter;

/// Register a new account. The duplicate check is a COUNT at business level
/// so the error stays distinguishable from a constraint violation.
pub async fn register(request: RegisterUserRequest) -> Result<UserResponse, ApiError> {
    tracing::debug!("UserService.register({})", request.username);
    request.validate()?;

    let pool = DatabaseManager::pool().await?;

    let mut filter = Filter::new("users")?;
    filter.and_eq("username", request.username.as_str())?;
    let taken = Repository::<User>::new(pool.clone()).count(&filter).await?;
    if taken != 0 {
        return Err(ApiError::already_exists("Username already exists"));
    }

    let cost = crate::config::config().security.bcrypt_cost;
    let password_hash = bcrypt::hash(&request.password, cost)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash, name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&request.username)
    .bind(&password_hash)
    .bind(&request.name)
    .fetch_one(&pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(UserResponse::from(user))
}

/// Authenticate and rotate the session token. Unknown username and wrong
/// password produce the same generic error; success stores a fresh opaque
/// token, which invalidates whatever token was there before.
pub async fn login(request: LoginUserRequest) -> Result<UserResponse, ApiError> {
    tracing::debug!("UserService.login({})", request.username);
    request.validate()?;

    let pool = DatabaseManager::pool().await?;

    let mut filter = Filter::new("users")?;
    filter.and_eq("username", request.username.as_str())?;
    let user = Repository::<User>::new(pool.clone())
        .select_optional(&filter)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !bcrypt::verify(&request.password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = Uuid::new_v4().to_string();
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET token = $1 WHERE username = $2 RETURNING *",
    )
    .bind(&token)
    .bind(&user.username)
    .fetch_one(&pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(UserResponse {
        username: user.username,
        name: user.name,
        token: user.token,
    })
}

pub fn current(user: &User) -> UserResponse {
    tracing::debug!("UserService.current({})", user.username);
    UserResponse::from(user.clone())
}

/// Partial profile update: only supplied fields change, a supplied password
/// is re-hashed, everything else keeps its prior value.
pub async fn update(user: User, request: UpdateUserRequest) -> Result<UserResponse, ApiError> {
    tracing::debug!("UserService.update({})", user.username);
    request.validate()?;

    let name = request.name.or(user.name);
    let password_hash = match request.password {
        Some(password) => {
            let cost = crate::config::config().security.bcrypt_cost;
            bcrypt::hash(&password, cost)?
        }
        None => user.password_hash,
    };

    let pool = DatabaseManager::pool().await?;
    let updated = sqlx::query_as::<_, User>(
        "UPDATE users SET name = $1, password_hash = $2 WHERE username = $3 RETURNING *",
    )
    .bind(&name)
    .bind(&password_hash)
    .bind(&user.username)
    .fetch_one(&pool)
    .await
    .map_err(DatabaseError::from)?;

    Ok(UserResponse::from(updated))
}

/// Clear the stored token unconditionally for the authenticated user.
pub async fn logout(user: &User) -> Result<(), ApiError> {
    tracing::debug!("UserService.logout({})", user.username);

    let pool = DatabaseManager::pool().await?;
    sqlx::query("UPDATE users SET token = NULL WHERE username = $1")
        .bind(&user.username)
        .execute(&pool)
        .await
        .map_err(DatabaseError::from)?;

    Ok(())
}

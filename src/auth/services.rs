use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{dto::LoginResponse, jwt::JwtKeys, password::verify_password},
    error::{AppError, AppResult},
    users::{
        repo::UserRepo,
        repo_types::User,
        services::{find_one, is_valid_email, normalize_email},
    },
};

/// Check a credential pair and issue an access token.
///
/// An unknown email answers `NotFound` while a wrong password answers
/// `Unauthorized`. Callers can therefore tell registered emails apart.
pub async fn login(
    users: &dyn UserRepo,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> AppResult<LoginResponse> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    let user = users.find_by_email(&email).await?.ok_or_else(|| {
        warn!(email = %email, "login unknown email");
        AppError::NotFound(format!("No user found for email: {email}"))
    })?;

    if !verify_password(password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid password".into()));
    }

    let access_token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(LoginResponse {
        access_token,
        email: user.email,
        expires_in: keys.ttl.as_secs(),
    })
}

/// Resolve the user behind a verified token. A token whose user no longer
/// exists is treated as invalid.
pub async fn current_user(users: &dyn UserRepo, user_id: Uuid) -> AppResult<User> {
    find_one(users, user_id).await?.ok_or_else(|| {
        warn!(user_id = %user_id, "token subject not found");
        AppError::Unauthorized("User not found".into())
    })
}

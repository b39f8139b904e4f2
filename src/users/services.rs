use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::users::{dto::CreateUserRequest, repo::UserRepo, repo_types::User};

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate the credential pair, hash the password and store the user.
pub async fn register(users: &dyn UserRepo, req: CreateUserRequest) -> AppResult<User> {
    let email = normalize_email(&req.email);

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    if req.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }

    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&req.password)?;
    let user = users.create(&email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

pub async fn find_one(users: &dyn UserRepo, id: Uuid) -> AppResult<Option<User>> {
    users.find_by_id(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::testing::InMemoryUsers;

    fn req(email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@b.com"));
        assert!(!is_valid_email("spaces in@b.com"));
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let users = InMemoryUsers::default();
        let user = register(&users, req("  Test@Gmail.com ", "password123"))
            .await
            .expect("register");

        assert_eq!(user.email, "test@gmail.com");
        assert_ne!(user.password_hash, "password123");
        assert!(verify_password("password123", &user.password_hash).unwrap());

        let found = find_one(&users, user.id).await.unwrap().expect("stored");
        assert_eq!(found.email, "test@gmail.com");
    }

    #[tokio::test]
    async fn register_rejects_invalid_input() {
        let users = InMemoryUsers::default();

        let err = register(&users, req("not-an-email", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = register(&users, req("ok@example.com", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        assert!(users.all().is_empty());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let users = InMemoryUsers::default();
        register(&users, req("dup@example.com", "password123"))
            .await
            .unwrap();

        let err = register(&users, req("DUP@example.com", "another-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(users.all().len(), 1);
    }

    #[tokio::test]
    async fn find_one_unknown_id_is_none() {
        let users = InMemoryUsers::default();
        assert!(find_one(&users, Uuid::new_v4()).await.unwrap().is_none());
    }
}

//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// User entity as stored; never serialized directly
#[derive(Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("profile_pic", &self.profile_pic)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// User as it crosses the service boundary, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            profile_pic: user.profile_pic,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// New user creation payload; the password is already hashed
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial user update; `None` leaves the column untouched
#[derive(Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub profile_pic: Option<String>,
}

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request for an account settings update
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_pic: Option<String>,
}

/// Request for account deletion
#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "alice01".to_string(),
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            profile_pic: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn debug_output_redacts_hash() {
        let rendered = format!("{:?}", user());
        assert!(rendered.contains("alice01"));
        assert!(!rendered.contains("argon2id"));
    }

    #[test]
    fn public_user_has_no_password_field() {
        let value = serde_json::to_value(PublicUser::from(user())).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.keys().all(|key| !key.contains("password")));
        assert_eq!(object["username"], "alice01");
    }
}

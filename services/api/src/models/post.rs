//! Post model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
    pub username: String,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New post creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
    pub username: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Request for a post update; `username` identifies the author
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostRequest {
    pub username: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Partial post update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub categories: Option<Vec<String>>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(request: UpdatePostRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            photo: request.photo,
            categories: request.categories,
        }
    }
}

/// Request for post deletion
#[derive(Debug, Clone, Deserialize)]
pub struct DeletePostRequest {
    pub username: String,
}

/// Query parameters for post listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilter {
    /// Only posts written by this username
    pub user: Option<String>,
    /// Only posts tagged with this category
    pub cat: Option<String>,
}

impl PostFilter {
    /// Whether a post passes both filters
    pub fn matches(&self, post: &Post) -> bool {
        let by_user = self.user.as_ref().is_none_or(|user| &post.username == user);
        let in_category = self
            .cat
            .as_ref()
            .is_none_or(|cat| post.categories.iter().any(|c| c == cat));

        by_user && in_category
    }
}

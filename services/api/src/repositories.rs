//! Repositories for blog storage
//!
//! Each table is reached through a trait so handlers work the same against
//! PostgreSQL and the in-memory store. Duplicate detection is left to the
//! store: implementations report unique violations as
//! [`DatabaseError::Duplicate`](common::error::DatabaseError::Duplicate)
//! carrying one of the constraint names below.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{
    Category, NewCategory, NewPost, NewUser, Post, PostChanges, PostFilter, User, UserChanges,
};

pub mod category;
pub mod memory;
pub mod post;
pub mod user;

pub use category::PgCategoryRepository;
pub use memory::MemoryStore;
pub use post::PgPostRepository;
pub use user::PgUserRepository;

pub const USERS_USERNAME_KEY: &str = "users_username_key";
pub const USERS_EMAIL_KEY: &str = "users_email_key";
pub const POSTS_TITLE_KEY: &str = "posts_title_key";
pub const CATEGORIES_NAME_KEY: &str = "categories_name_key";

/// Credential store
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; fails with a duplicate error on a taken username or email
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// Apply the given changes; `Ok(None)` when no user has this id
    async fn update(&self, id: Uuid, changes: &UserChanges) -> DatabaseResult<Option<User>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, new_post: &NewPost) -> DatabaseResult<Post>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Post>>;

    /// Posts passing the filter, newest first
    async fn list(&self, filter: &PostFilter) -> DatabaseResult<Vec<Post>>;

    async fn update(&self, id: Uuid, changes: &PostChanges) -> DatabaseResult<Option<Post>>;

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Remove every post by this author, returning how many went
    async fn delete_by_username(&self, username: &str) -> DatabaseResult<u64>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, new_category: &NewCategory) -> DatabaseResult<Category>;

    /// All categories ordered by name
    async fn list(&self) -> DatabaseResult<Vec<Category>>;
}

//! In-memory store for local runs and tests
//!
//! Every write takes the table's write lock before checking uniqueness, so
//! the check and the insert are one atomic step, like a unique index.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CATEGORIES_NAME_KEY, CategoryRepository, POSTS_TITLE_KEY, PostRepository, USERS_EMAIL_KEY,
    USERS_USERNAME_KEY, UserRepository,
};
use crate::models::{
    Category, NewCategory, NewPost, NewUser, Post, PostChanges, PostFilter, User, UserChanges,
};

/// Users, posts and categories held in process memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    posts: Arc<RwLock<Vec<Post>>>,
    categories: Arc<RwLock<Vec<Category>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(constraint: &str) -> DatabaseError {
    DatabaseError::Duplicate {
        constraint: constraint.to_string(),
    }
}

/// Uniqueness check for a user row, ignoring the row being updated
fn check_user_unique(
    users: &[User],
    skip: Option<Uuid>,
    username: Option<&str>,
    email: Option<&str>,
) -> DatabaseResult<()> {
    let others = || users.iter().filter(move |u| Some(u.id) != skip);

    if let Some(username) = username {
        if others().any(|u| u.username == username) {
            return Err(duplicate(USERS_USERNAME_KEY));
        }
    }

    if let Some(email) = email {
        if others().any(|u| u.email == email) {
            return Err(duplicate(USERS_EMAIL_KEY));
        }
    }

    Ok(())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;
        check_user_unique(
            &users,
            None,
            Some(&new_user.username),
            Some(&new_user.email),
        )?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            profile_pic: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> DatabaseResult<Option<User>> {
        let mut users = self.users.write().await;
        if !users.iter().any(|u| u.id == id) {
            return Ok(None);
        }
        check_user_unique(
            &users,
            Some(id),
            changes.username.as_deref(),
            changes.email.as_deref(),
        )?;

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(username) = &changes.username {
            user.username = username.clone();
        }
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(profile_pic) = &changes.profile_pic {
            user.profile_pic = Some(profile_pic.clone());
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create(&self, new_post: &NewPost) -> DatabaseResult<Post> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.title == new_post.title) {
            return Err(duplicate(POSTS_TITLE_KEY));
        }

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: new_post.title.clone(),
            description: new_post.description.clone(),
            photo: new_post.photo.clone(),
            username: new_post.username.clone(),
            categories: new_post.categories.clone(),
            created_at: now,
            updated_at: now,
        };
        posts.push(post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: &PostFilter) -> DatabaseResult<Vec<Post>> {
        let posts = self.posts.read().await;
        // Newest insertions first so equal timestamps still come out newest first.
        let mut matching: Vec<Post> = posts
            .iter()
            .rev()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching)
    }

    async fn update(&self, id: Uuid, changes: &PostChanges) -> DatabaseResult<Option<Post>> {
        let mut posts = self.posts.write().await;
        if let Some(title) = &changes.title {
            if posts.iter().any(|p| p.id != id && &p.title == title) {
                return Err(duplicate(POSTS_TITLE_KEY));
            }
        }

        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            post.title = title.clone();
        }
        if let Some(description) = &changes.description {
            post.description = description.clone();
        }
        if let Some(photo) = &changes.photo {
            post.photo = Some(photo.clone());
        }
        if let Some(categories) = &changes.categories {
            post.categories = categories.clone();
        }
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }

    async fn delete_by_username(&self, username: &str) -> DatabaseResult<u64> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.username != username);
        Ok((before - posts.len()) as u64)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, new_category: &NewCategory) -> DatabaseResult<Category> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.name == new_category.name) {
            return Err(duplicate(CATEGORIES_NAME_KEY));
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: new_category.name.clone(),
            created_at: now,
            updated_at: now,
        };
        categories.push(category.clone());

        Ok(category)
    }

    async fn list(&self) -> DatabaseResult<Vec<Category>> {
        let mut categories = self.categories.read().await.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

//! PostgreSQL post repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::PostRepository;
use crate::models::{NewPost, Post, PostChanges, PostFilter};

/// Post repository backed by the `posts` table
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, new_post: &NewPost) -> DatabaseResult<Post> {
        info!("Creating post '{}' by {}", new_post.title, new_post.username);

        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, description, photo, username, categories)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, photo, username, categories, created_at, updated_at
            "#,
        )
        .bind(&new_post.title)
        .bind(&new_post.description)
        .bind(&new_post.photo)
        .bind(&new_post.username)
        .bind(&new_post.categories)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, description, photo, username, categories, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn list(&self, filter: &PostFilter) -> DatabaseResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, description, photo, username, categories, created_at, updated_at
            FROM posts
            WHERE ($1::TEXT IS NULL OR username = $1)
              AND ($2::TEXT IS NULL OR $2 = ANY(categories))
            ORDER BY created_at DESC
            "#,
        )
        .bind(&filter.user)
        .bind(&filter.cat)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn update(&self, id: Uuid, changes: &PostChanges) -> DatabaseResult<Option<Post>> {
        info!("Updating post: {}", id);

        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                photo = COALESCE($4, photo),
                categories = COALESCE($5, categories),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, photo, username, categories, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.photo)
        .bind(&changes.categories)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting post: {}", id);

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_username(&self, username: &str) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected())
    }
}

//! Post CRUD

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{DeletePostRequest, NewPost, Post, PostChanges, PostFilter, UpdatePostRequest},
    state::AppState,
};

fn post_not_found() -> ApiError {
    ApiError::NotFound("Post not found!".to_string())
}

/// Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewPost>,
) -> ApiResult<Json<Post>> {
    let post = state
        .post_repository
        .create(&payload)
        .await
        .map_err(ApiError::from_write)?;

    Ok(Json(post))
}

/// Get a post by ID
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Post>> {
    let post = state
        .post_repository
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(Json(post))
}

/// List posts, optionally by author (`user`) and category (`cat`)
pub async fn list_posts(
    State(state): State<AppState>,
    Query(filter): Query<PostFilter>,
) -> ApiResult<Json<Vec<Post>>> {
    let posts = state.post_repository.list(&filter).await?;

    Ok(Json(posts))
}

/// Update a post; only its author may
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdatePostRequest>,
) -> ApiResult<Json<Post>> {
    let post = state
        .post_repository
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    if post.username != payload.username {
        return Err(ApiError::Forbidden(
            "You can update only your post!".to_string(),
        ));
    }

    let changes = PostChanges::from(payload);
    let post = state
        .post_repository
        .update(id, &changes)
        .await
        .map_err(ApiError::from_write)?
        .ok_or_else(post_not_found)?;

    Ok(Json(post))
}

/// Delete a post; only its author may
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<DeletePostRequest>,
) -> ApiResult<Json<&'static str>> {
    let post = state
        .post_repository
        .find_by_id(id)
        .await?
        .ok_or_else(post_not_found)?;

    if post.username != payload.username {
        return Err(ApiError::Forbidden(
            "You can delete only your post!".to_string(),
        ));
    }

    state.post_repository.delete(id).await?;

    info!("Post deleted: {}", id);
    Ok(Json("Post has been deleted..."))
}

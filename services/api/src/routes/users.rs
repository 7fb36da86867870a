//! Account lookup, settings update and deletion

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{DeleteUserRequest, PublicUser, UpdateUserRequest, UserChanges},
    password,
    state::AppState,
};

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found!".to_string())
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PublicUser>> {
    let user = state
        .user_repository
        .find_by_id(id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(PublicUser::from(user)))
}

/// Update account settings; a new password is re-hashed before storing
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<PublicUser>> {
    if payload.user_id != id {
        return Err(ApiError::Forbidden(
            "You can update only your account!".to_string(),
        ));
    }

    let password_hash = match payload.password {
        Some(password) => Some(
            password::hash_password(password)
                .await
                .map_err(|e| ApiError::internal("Failed to hash password", e))?,
        ),
        None => None,
    };

    let changes = UserChanges {
        username: payload.username,
        email: payload.email,
        password_hash,
        profile_pic: payload.profile_pic,
    };

    let user = state
        .user_repository
        .update(id, &changes)
        .await
        .map_err(ApiError::from_write)?
        .ok_or_else(user_not_found)?;

    info!("User updated: {}", user.id);
    Ok(Json(PublicUser::from(user)))
}

/// Delete an account together with every post it authored
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<DeleteUserRequest>,
) -> ApiResult<Json<&'static str>> {
    if payload.user_id != id {
        return Err(ApiError::Forbidden(
            "You can delete only your account!".to_string(),
        ));
    }

    let user = state
        .user_repository
        .find_by_id(id)
        .await?
        .ok_or_else(user_not_found)?;

    let removed_posts = state
        .post_repository
        .delete_by_username(&user.username)
        .await?;
    state.user_repository.delete(id).await?;

    info!(
        "User deleted: {} ({} posts removed)",
        user.username, removed_posts
    );
    Ok(Json("User has been deleted..."))
}

//! Registration and login

use axum::{Json, extract::State};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{LoginRequest, NewUser, PublicUser, RegisterRequest},
    password,
    state::AppState,
};

/// User registration endpoint
///
/// Duplicate usernames and emails are rejected by the store's unique
/// constraints; there is no lookup beforehand.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<Json<PublicUser>> {
    info!("Registration attempt for user: {}", payload.username);

    let password_hash = password::hash_password(payload.password)
        .await
        .map_err(|e| ApiError::internal("Failed to hash password", e))?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password_hash,
    };

    let user = state
        .user_repository
        .create(&new_user)
        .await
        .map_err(|e| {
            let err = ApiError::from_write(e);
            if let ApiError::Conflict(message) = &err {
                warn!("Registration rejected for {}: {}", new_user.username, message);
            }
            err
        })?;

    info!("User registered: {} ({})", user.username, user.id);
    Ok(Json(PublicUser::from(user)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<PublicUser>> {
    info!("Login attempt for user: {}", payload.username);

    let Some(user) = state
        .user_repository
        .find_by_username(&payload.username)
        .await?
    else {
        password::verify_against_dummy(payload.password)
            .await
            .map_err(|e| ApiError::internal("Failed to verify password", e))?;
        return Err(ApiError::Unauthorized);
    };

    let valid = password::verify_password(payload.password, user.password_hash.clone())
        .await
        .map_err(|e| ApiError::internal("Failed to verify password", e))?;
    if !valid {
        return Err(ApiError::Unauthorized);
    }

    info!("User logged in: {}", user.username);
    Ok(Json(PublicUser::from(user)))
}

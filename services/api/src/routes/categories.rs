use axum::{Json, extract::State};

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{Category, NewCategory},
    state::AppState,
};

pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewCategory>,
) -> ApiResult<Json<Category>> {
    let category = state
        .category_repository
        .create(&payload)
        .await
        .map_err(ApiError::from_write)?;

    Ok(Json(category))
}

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.category_repository.list().await?))
}

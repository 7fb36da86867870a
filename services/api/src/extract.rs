//! Request extractors

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body whose rejections answer in the API's own error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

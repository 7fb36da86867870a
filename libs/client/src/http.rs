//! HTTP client for the blog API

use reqwest::{
    Response,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{session::User, validation::ValidationError};

/// Errors surfaced by client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// The form never left the client
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The API answered with a non-success status
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The action needs a signed-in user
    #[error("Not signed in")]
    NotSignedIn,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Registration payload
#[derive(Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Login payload
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Settings update payload
#[derive(Clone, Serialize)]
pub struct UpdateUserRequest<'a> {
    pub user_id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<&'a str>,
}

/// Thin typed wrapper over the REST endpoints
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlogClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn login(&self, request: &LoginRequest<'_>) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        request: &UpdateUserRequest<'_>,
    ) -> Result<User, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/users/{}", id)))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/users/{}", id)))
            .json(&serde_json::json!({ "user_id": id }))
            .send()
            .await?;

        let _: Value = decode(response).await?;
        Ok(())
    }

    /// Upload an image that the server stores as `name`
    pub async fn upload(&self, name: &str, bytes: Vec<u8>) -> Result<(), ClientError> {
        info!("Uploading {} ({} bytes)", name, bytes.len());

        let form = Form::new()
            .text("name", name.to_string())
            .part("file", Part::bytes(bytes).file_name(name.to_string()));
        let response = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;

        let _: Value = decode(response).await?;
        Ok(())
    }
}

/// Parse a success body, or turn an error status into [`ClientError::Rejected`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await?;
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

/// The API sends either `{"message": ...}` or a bare JSON string
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) => message,
        Ok(Value::Object(object)) => object
            .get("message")
            .or_else(|| object.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        _ => body.to_string(),
    }
}

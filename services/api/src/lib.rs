//! REST API for the Inkwell blog
//!
//! Auth, users, posts, categories and image upload over axum, with storage
//! behind repository traits so the same router runs on PostgreSQL or in
//! memory.

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

//! API models for stored entities and request payloads

pub mod category;
pub mod post;
pub mod user;

pub use category::{Category, NewCategory};
pub use post::{DeletePostRequest, NewPost, Post, PostChanges, PostFilter, UpdatePostRequest};
pub use user::{
    DeleteUserRequest, LoginRequest, NewUser, PublicUser, RegisterRequest, UpdateUserRequest,
    User, UserChanges,
};

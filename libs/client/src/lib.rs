//! Client side of the Inkwell blog
//!
//! Everything the single-page front end does besides drawing: credential
//! validation, the self-clearing notice, the session reducer, the HTTP calls
//! and the submit flows that tie them together.

pub mod app;
pub mod forms;
pub mod http;
pub mod notice;
pub mod session;
pub mod validation;

pub use app::App;
pub use http::{BlogClient, ClientError};
pub use session::{Session, SessionAction, SessionState, User};
pub use validation::ValidationError;

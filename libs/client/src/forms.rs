//! Form inputs and the checks each runs before submission

use crate::validation::{
    ValidationError, require_filled, validate_email, validate_password, validate_username,
};

pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_filled(&[self.username.as_str(), self.password.as_str()])?;
        validate_username(&self.username)?;
        validate_password(&self.password)
    }
}

pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_account(&self.username, &self.email, &self.password)
    }
}

/// A picture chosen in the settings form
pub struct Picture {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Account settings; every credential field must be filled in again
pub struct SettingsForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub picture: Option<Picture>,
}

impl SettingsForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_account(&self.username, &self.email, &self.password)
    }
}

fn validate_account(username: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    require_filled(&[username, email, password])?;
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)
}

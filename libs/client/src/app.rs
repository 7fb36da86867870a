//! Submit flows for the login, register and settings pages
//!
//! [`App`] is the application state handed to every page: the API client,
//! the session and the notices. Each flow validates first, and a failed
//! check shows a notice and sends nothing.

use chrono::Utc;
use tracing::{error, warn};

use crate::{
    forms::{LoginForm, RegisterForm, SettingsForm},
    http::{BlogClient, ClientError, LoginRequest, RegisterRequest, UpdateUserRequest},
    notice::{FIELD_NOTICE_TTL, FORM_NOTICE_TTL, Notice},
    session::{Session, SessionAction, User},
    validation::ValidationError,
};

/// Shown when registration fails for a reason other than a taken field
pub const GENERIC_REGISTER_ERROR: &str =
    "An error occurred. Please check your input and try again.";

pub struct App {
    client: BlogClient,
    session: Session,
    notice: Notice,
    username_notice: Notice,
    email_notice: Notice,
}

impl App {
    pub fn new(client: BlogClient) -> Self {
        Self {
            client,
            session: Session::new(),
            notice: Notice::new(),
            username_notice: Notice::new(),
            email_notice: Notice::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Form-level message
    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Register page message next to the username field
    pub fn username_notice(&self) -> &Notice {
        &self.username_notice
    }

    /// Register page message next to the email field
    pub fn email_notice(&self) -> &Notice {
        &self.email_notice
    }

    async fn reject(&self, err: ValidationError) -> ClientError {
        self.notice.show(err.to_string(), FORM_NOTICE_TTL).await;
        ClientError::Validation(err)
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<(), ClientError> {
        if let Err(err) = form.validate() {
            return Err(self.reject(err).await);
        }

        self.session.dispatch(SessionAction::LoginStart);
        let request = LoginRequest {
            username: &form.username,
            password: &form.password,
        };

        match self.client.login(&request).await {
            Ok(user) => {
                self.session.dispatch(SessionAction::LoginSuccess(user));
                Ok(())
            }
            Err(err) => {
                self.session.dispatch(SessionAction::LoginFailure);
                Err(err)
            }
        }
    }

    /// Create an account. The session is left alone; the user logs in next.
    pub async fn register(&mut self, form: &RegisterForm) -> Result<User, ClientError> {
        if let Err(err) = form.validate() {
            return Err(self.reject(err).await);
        }

        let request = RegisterRequest {
            username: &form.username,
            email: &form.email,
            password: &form.password,
        };

        match self.client.register(&request).await {
            Ok(user) => Ok(user),
            Err(err) => {
                self.show_register_error(&err).await;
                Err(err)
            }
        }
    }

    async fn show_register_error(&self, err: &ClientError) {
        match err {
            ClientError::Rejected { status: 400, message } if message.contains("Username") => {
                self.email_notice.clear().await;
                self.username_notice
                    .show(message.clone(), FIELD_NOTICE_TTL)
                    .await;
            }
            ClientError::Rejected { status: 400, message } if message.contains("Email") => {
                self.username_notice.clear().await;
                self.email_notice.show(message.clone(), FIELD_NOTICE_TTL).await;
            }
            _ => {
                self.username_notice.clear().await;
                self.email_notice.clear().await;
                self.notice
                    .show(GENERIC_REGISTER_ERROR, FORM_NOTICE_TTL)
                    .await;
            }
        }
    }

    /// Save account settings, uploading a new profile picture first if one
    /// was picked. A failed upload is logged and the update still goes out.
    pub async fn update_settings(&mut self, form: &SettingsForm) -> Result<(), ClientError> {
        let user_id = self
            .session
            .user()
            .map(|user| user.id)
            .ok_or(ClientError::NotSignedIn)?;

        if let Err(err) = form.validate() {
            return Err(self.reject(err).await);
        }

        self.session.dispatch(SessionAction::UpdateStart);

        let mut profile_pic = None;
        if let Some(picture) = &form.picture {
            let file_name = format!("{}{}", Utc::now().timestamp_millis(), picture.file_name);
            if let Err(err) = self.client.upload(&file_name, picture.bytes.clone()).await {
                warn!("Profile picture upload failed: {}", err);
            }
            profile_pic = Some(file_name);
        }

        let request = UpdateUserRequest {
            user_id,
            username: &form.username,
            email: &form.email,
            password: &form.password,
            profile_pic: profile_pic.as_deref(),
        };

        match self.client.update_user(user_id, &request).await {
            Ok(user) => {
                self.session.dispatch(SessionAction::UpdateSuccess(user));
                Ok(())
            }
            Err(err) => {
                self.session.dispatch(SessionAction::UpdateFailure);
                Err(err)
            }
        }
    }

    /// Delete the signed-in account; on failure the session is untouched
    pub async fn delete_account(&mut self) -> Result<(), ClientError> {
        let user_id = self
            .session
            .user()
            .map(|user| user.id)
            .ok_or(ClientError::NotSignedIn)?;

        match self.client.delete_user(user_id).await {
            Ok(()) => {
                self.session.dispatch(SessionAction::DeleteUser);
                Ok(())
            }
            Err(err) => {
                error!("Error deleting user: {}", err);
                Err(err)
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.dispatch(SessionAction::Logout);
    }
}

//! Login and Signup Handlers
//!
//! Validate the form, call the service, and redirect on success.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::client::{Backend, LoginRequest, RegisterRequest, StatusResponse};
use crate::config::UiConfig;
use crate::outcome::{Outcome, Submission};
use crate::ui::view::Loading;
use crate::ui::{FormId, Notification, NotificationKind, Redirect, View};
use crate::util::{validate_email, validate_password, PASSWORD_TOO_SHORT};

const INVALID_EMAIL: &str = "Please enter a valid email address";
const MISSING_NAME: &str = "Please enter your full name";

/// Raw login form input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Raw signup form input
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Handles the two authentication forms
pub struct AuthController<B, V> {
    backend: Arc<B>,
    view: Arc<V>,
    settings: UiConfig,
    in_flight: AtomicBool,
}

impl<B: Backend, V: View> AuthController<B, V> {
    pub fn new(backend: Arc<B>, view: Arc<V>, settings: UiConfig) -> Self {
        Self {
            backend,
            view,
            settings,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit the login form; redirects to the dashboard on success
    pub async fn login(&self, form: &LoginForm) -> Outcome {
        let email = form.email.trim();
        let password = form.password.trim();

        if !validate_email(email) {
            self.notify(NotificationKind::Error, INVALID_EMAIL);
            return Outcome::Rejected;
        }
        if !validate_password(password) {
            self.notify(NotificationKind::Error, PASSWORD_TOO_SHORT);
            return Outcome::Rejected;
        }

        let Some(_submission) = Submission::begin(&self.in_flight) else {
            tracing::debug!("login already in flight, ignoring submit");
            return Outcome::Skipped;
        };

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let loading = Loading::start(&*self.view, FormId::Login);
        let result = self.backend.login(&request).await;
        let outcome = self.finish(
            result,
            Redirect::Dashboard,
            "Error during login. Please try again.",
        );
        drop(loading);

        outcome
    }

    /// Submit the signup form; redirects to the login page on success
    pub async fn signup(&self, form: &SignupForm) -> Outcome {
        let name = form.name.trim();
        let email = form.email.trim();
        let password = form.password.trim();

        if name.is_empty() {
            self.notify(NotificationKind::Error, MISSING_NAME);
            return Outcome::Rejected;
        }
        if !validate_email(email) {
            self.notify(NotificationKind::Error, INVALID_EMAIL);
            return Outcome::Rejected;
        }
        if !validate_password(password) {
            self.notify(NotificationKind::Error, PASSWORD_TOO_SHORT);
            return Outcome::Rejected;
        }

        let Some(_submission) = Submission::begin(&self.in_flight) else {
            tracing::debug!("signup already in flight, ignoring submit");
            return Outcome::Skipped;
        };

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let loading = Loading::start(&*self.view, FormId::Signup);
        let result = self.backend.register(&request).await;
        let outcome = self.finish(
            result,
            Redirect::Login,
            "Error during registration. Please try again.",
        );
        drop(loading);

        outcome
    }

    fn finish(
        &self,
        result: crate::client::ClientResult<StatusResponse>,
        on_success: Redirect,
        fallback: &str,
    ) -> Outcome {
        match result {
            Ok(response) if response.success => {
                self.notify(NotificationKind::Success, &response.message);
                self.view.redirect(on_success, self.settings.redirect_delay());
                Outcome::Succeeded
            }
            Ok(response) => {
                self.notify(NotificationKind::Error, &response.message);
                Outcome::Declined
            }
            Err(e) => {
                tracing::warn!(error = %e, "authentication request failed");
                self.notify(NotificationKind::Error, fallback);
                Outcome::Failed
            }
        }
    }

    fn notify(&self, kind: NotificationKind, message: &str) {
        self.view.notify(&Notification::new(
            kind,
            message,
            self.settings.notification_ttl(),
        ));
    }
}

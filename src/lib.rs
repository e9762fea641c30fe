//! # Docchat
//!
//! Headless client for a document-upload and chat-assistant service.
//!
//! ## Features
//!
//! - **Typed backend**: one async method per REST endpoint, session cookie kept
//!   by the HTTP client
//! - **Controllers**: login/signup handlers and a dashboard controller
//!   (navigation, chat, documents, upload, profile) with explicit UI state
//! - **Render interface**: controllers describe output through the [`View`]
//!   trait, so they run without any concrete UI
//! - **Terminal front-end**: colored notifications and progress bars
//!
//! ## Modules
//!
//! - [`client`]: DTOs, the [`Backend`] trait and [`HttpBackend`]
//! - [`ui`]: view models, [`UiState`] and [`TerminalView`]
//! - [`auth`]: [`AuthController`]
//! - [`dashboard`]: [`Dashboard`]
//! - [`util`]: validation and formatting helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docchat::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(HttpBackend::new(&config.server)?);
//!     let view = Arc::new(TerminalView::default());
//!
//!     let auth = AuthController::new(backend.clone(), view.clone(), config.ui.clone());
//!     let form = LoginForm {
//!         email: "ada@example.com".into(),
//!         password: "secret1".into(),
//!     };
//!     if auth.login(&form).await.is_success() {
//!         let dashboard = Dashboard::new(backend, view, config.ui);
//!         dashboard.init().await;
//!         dashboard.submit_question("What is in my documents?").await;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod outcome;
pub mod ui;
pub mod util;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use auth::{AuthController, LoginForm, SignupForm};

pub use client::{
    Backend, ClientError, ClientResult, Document, HttpBackend, UploadFile, UserProfile,
};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig, ServerConfig, UiConfig};

pub use dashboard::{Dashboard, ProfileForm};

pub use outcome::Outcome;

pub use ui::{
    ChatMessage, DocumentsView, Notification, NotificationKind, Section, TerminalView, UiState,
    UnknownSection, View,
};

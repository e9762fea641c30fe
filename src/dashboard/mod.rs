//! Dashboard Controller
//!
//! Owns the page-lifetime [`UiState`] and wires the five dashboard
//! features to the backend and the view:
//!
//! - navigation between [`Section`]s (this file)
//! - chat ([`chat`])
//! - document listing and deletion ([`documents`])
//! - file upload with a progress indicator ([`upload`])
//! - profile editing ([`profile`])
//!
//! Handlers take `&self` and may run concurrently, the way UI events do.
//! The state lock is never held across a request. The chat and upload
//! in-flight flags live outside it, in atomics held by drop guards, so a
//! handler future dropped mid-request still releases them.

mod chat;
mod documents;
mod profile;
mod upload;

pub use profile::ProfileForm;
pub use upload::next_progress;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::client::Backend;
use crate::config::UiConfig;
use crate::ui::{Notification, NotificationKind, Redirect, Section, UiState, UnknownSection, View};

pub struct Dashboard<B, V> {
    backend: Arc<B>,
    view: Arc<V>,
    settings: UiConfig,
    state: RwLock<UiState>,
    chat_in_flight: AtomicBool,
    uploading: AtomicBool,
}

impl<B, V> Dashboard<B, V>
where
    B: Backend + 'static,
    V: View + 'static,
{
    pub fn new(backend: Arc<B>, view: Arc<V>, settings: UiConfig) -> Self {
        Self {
            backend,
            view,
            settings,
            state: RwLock::new(UiState::new()),
            chat_in_flight: AtomicBool::new(false),
            uploading: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current UI state
    pub async fn state(&self) -> UiState {
        let mut state = self.state.read().await.clone();
        state.chat_in_flight = self.chat_in_flight.load(Ordering::Acquire);
        state.is_uploading = self.uploading.load(Ordering::Acquire);
        state
    }

    pub async fn current_section(&self) -> Section {
        self.state.read().await.current_section
    }

    /// Initial page load: open the chat, then fetch documents and the profile
    pub async fn init(&self) {
        self.show_section(Section::Chat).await;
        self.load_documents().await;
        self.load_user_info().await;
    }

    /// Switch the visible section and load its data
    pub async fn show_section(&self, section: Section) {
        self.view.activate_section(section);
        self.view.set_header(section.header());

        let epoch = {
            let mut state = self.state.write().await;
            state.current_section = section;
            state.nav_epoch += 1;
            state.nav_epoch
        };
        tracing::debug!(%section, epoch, "section shown");

        match section {
            Section::Documents => self.refresh_documents(Some(epoch)).await,
            Section::Profile => self.refresh_user_info(Some(epoch)).await,
            Section::Chat => self.refresh_chat_history(Some(epoch)).await,
            Section::Upload => {}
        }
    }

    /// Switch section by name, as menu entries carry it
    pub async fn show_section_named(&self, name: &str) -> Result<(), UnknownSection> {
        let section = name.parse::<Section>().map_err(|e| {
            tracing::warn!(name, "ignoring navigation to unknown section");
            e
        })?;
        self.show_section(section).await;
        Ok(())
    }

    /// End the session and go back to the landing page, even if the
    /// request fails
    pub async fn logout(&self) {
        if let Err(e) = self.backend.logout().await {
            tracing::warn!(error = %e, "logout request failed");
        }
        self.view.redirect(Redirect::Home, Duration::ZERO);
    }

    /// Whether a section load started at `epoch` may still update the view
    async fn is_current(&self, epoch: Option<u64>) -> bool {
        match epoch {
            None => true,
            Some(epoch) => self.state.read().await.nav_epoch == epoch,
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

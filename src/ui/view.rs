//! Render Interface
//!
//! View models and the [`View`] trait every front-end implements.

use std::time::Duration;

use super::state::{Section, SectionHeader};
use crate::client::Document;
use crate::util::{file_icon, format_date};

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message shown to the user for `ttl`
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            ttl,
        }
    }
}

/// Forms with a submit button that shows a loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormId {
    Login,
    Signup,
    Profile,
}

/// Submit button loading state; switched off again when dropped
pub(crate) struct Loading<'a, V: View> {
    view: &'a V,
    form: FormId,
}

impl<'a, V: View> Loading<'a, V> {
    pub(crate) fn start(view: &'a V, form: FormId) -> Self {
        view.set_loading(form, true);
        Self { view, form }
    }
}

impl<V: View> Drop for Loading<'_, V> {
    fn drop(&mut self) {
        self.view.set_loading(self.form, false);
    }
}

/// Pages the front-end can navigate to outside the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Home,
    Login,
    Dashboard,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Home => "/",
            Redirect::Login => "/login",
            Redirect::Dashboard => "/dashboard",
        }
    }
}

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One rendered transcript entry
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub content: String,
    pub sources: Vec<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            content: content.into(),
            sources,
        }
    }

    /// `Sources: a, b` footer, if the answer cites any
    pub fn sources_line(&self) -> Option<String> {
        if self.sources.is_empty() {
            None
        } else {
            Some(format!("Sources: {}", self.sources.join(", ")))
        }
    }
}

/// Handle of a "Thinking..." placeholder in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderId(pub uuid::Uuid);

impl PlaceholderId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PlaceholderId {
    fn default() -> Self {
        Self::new()
    }
}

/// A document as displayed in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCard {
    pub id: String,
    pub filename: String,
    pub icon: &'static str,
    /// e.g. `Uploaded: Jan 5, 2024, 02:30 PM`
    pub uploaded: String,
}

impl From<&Document> for DocumentCard {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            filename: doc.filename.clone(),
            icon: file_icon(&doc.filename),
            uploaded: format!("Uploaded: {}", format_date(&doc.upload_date)),
        }
    }
}

/// Content of the documents section
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentsView {
    /// Nothing uploaded yet; the front-end offers a jump to the upload section
    Empty,
    Cards(Vec<DocumentCard>),
}

impl DocumentsView {
    pub fn from_documents(documents: &[Document]) -> Self {
        if documents.is_empty() {
            DocumentsView::Empty
        } else {
            DocumentsView::Cards(documents.iter().map(DocumentCard::from).collect())
        }
    }
}

/// Everything the controllers need from a front-end.
///
/// Calls arrive from async handlers, so implementations use interior
/// mutability and must be shareable across tasks.
pub trait View: Send + Sync {
    /// Show a transient notification
    fn notify(&self, notification: &Notification);

    /// Toggle the loading state of a form's submit button
    fn set_loading(&self, form: FormId, loading: bool);

    /// Leave the current page once `after` has elapsed
    fn redirect(&self, to: Redirect, after: Duration);

    /// Highlight the menu entry and show the section's content
    fn activate_section(&self, section: Section);

    fn set_header(&self, header: SectionHeader);

    // ---- chat ----

    fn append_message(&self, message: &ChatMessage);

    /// Remove all transcript entries, keeping the welcome banner
    fn clear_transcript(&self);

    fn clear_chat_input(&self);

    fn show_placeholder(&self, id: PlaceholderId);

    fn remove_placeholder(&self, id: PlaceholderId);

    // ---- documents ----

    fn render_documents(&self, documents: &DocumentsView);

    /// Blocking yes/no question
    fn confirm(&self, prompt: &str) -> bool;

    // ---- upload ----

    fn set_drop_highlight(&self, active: bool);

    fn show_progress(&self, label: &str);

    /// Progress in percent, `0.0..=100.0`
    fn set_progress(&self, percent: f64);

    fn hide_progress(&self);

    fn reset_file_input(&self);

    // ---- profile ----

    fn set_profile_fields(&self, name: &str, email: &str);

    fn set_profile_picture(&self, url: &str);

    fn clear_password_field(&self);
}

//! User Interface Layer
//!
//! The controllers never touch a concrete UI. They mutate [`UiState`] and
//! describe what to show through the [`View`] trait; a front-end (the
//! terminal renderer here, a browser or TUI elsewhere) decides how.

pub mod state;
pub mod terminal;
pub mod view;

pub use state::{Section, SectionHeader, UiState, UnknownSection};
pub use terminal::TerminalView;
pub use view::{
    ChatMessage, DocumentCard, DocumentsView, FormId, Notification, NotificationKind,
    PlaceholderId, Redirect, Sender, View,
};

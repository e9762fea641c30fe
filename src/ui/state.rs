//! Dashboard UI state

use std::fmt;
use std::str::FromStr;

use crate::client::Document;

/// One of the four mutually exclusive dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Chat,
    Documents,
    Upload,
    Profile,
}

/// Header text shown above the active section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Chat,
        Section::Documents,
        Section::Upload,
        Section::Profile,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Chat => "chat",
            Section::Documents => "documents",
            Section::Upload => "upload",
            Section::Profile => "profile",
        }
    }

    pub fn header(&self) -> SectionHeader {
        match self {
            Section::Chat => SectionHeader {
                title: "Chat Assistant",
                subtitle: "Ask questions about your documents",
            },
            Section::Documents => SectionHeader {
                title: "My Documents",
                subtitle: "Manage your uploaded files",
            },
            Section::Upload => SectionHeader {
                title: "Upload Files",
                subtitle: "Add new documents to your knowledge base",
            },
            Section::Profile => SectionHeader {
                title: "Profile Settings",
                subtitle: "Manage your account information",
            },
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A section name that does not match any dashboard view
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Page-lifetime state owned by the dashboard controller
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub current_section: Section,
    /// Last document list received from the server
    pub documents: Vec<Document>,
    /// Set while a document upload is in flight
    pub is_uploading: bool,
    /// Set while a question is awaiting its answer
    pub chat_in_flight: bool,
    /// Bumped on every navigation; section loads started under an older
    /// epoch discard their results
    pub nav_epoch: u64,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}

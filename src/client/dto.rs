//! Request/Response DTOs
//!
//! Wire shapes of the document assistant's JSON endpoints. Responses are
//! trusted as-is; every field the server may omit is defaulted.

use serde::{Deserialize, Serialize};

// ============================================
// Requests
// ============================================

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /ask_question`
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// Body of `POST /update_profile`.
///
/// An empty password leaves the stored one unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub password: String,
}

/// A local file headed for a multipart upload (`file` field)
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping only its file name
    pub async fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self { name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// ============================================
// Responses
// ============================================

/// Generic `{success, message}` envelope
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Account details shown on the profile page
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default = "default_avatar")]
    pub profile_pic: String,
}

/// Picture name the server reports for users who never uploaded one
pub const DEFAULT_AVATAR: &str = "default-avatar.png";

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

impl UserProfile {
    pub fn has_custom_picture(&self) -> bool {
        self.profile_pic != DEFAULT_AVATAR
    }
}

/// Response of `GET /api/user_info`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserInfoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /ask_question`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One past question/answer pair
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatExchange {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Response of `GET /get_chat_history`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatHistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub history: Vec<ChatExchange>,
}

/// An uploaded document as listed by the server
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub upload_date: String,
}

/// Response of `GET /get_documents`.
///
/// `documents` is absent when the server refuses the request
/// (e.g. no session), which leaves the client-side list untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DocumentListResponse {
    #[serde(default)]
    pub documents: Option<Vec<Document>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /upload_profile_pic`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfilePicResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub message: String,
}

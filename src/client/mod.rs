//! Document Assistant REST Client
//!
//! Typed access to the backend service consumed by the front-end:
//!
//! | Endpoint                | Method | Trait method          |
//! |-------------------------|--------|-----------------------|
//! | `/login`                | POST   | [`Backend::login`]    |
//! | `/register`             | POST   | [`Backend::register`] |
//! | `/logout`               | GET    | [`Backend::logout`]   |
//! | `/api/user_info`        | GET    | [`Backend::user_info`] |
//! | `/ask_question`         | POST   | [`Backend::ask_question`] |
//! | `/get_chat_history`     | GET    | [`Backend::chat_history`] |
//! | `/get_documents`        | GET    | [`Backend::documents`] |
//! | `/delete_document/:id`  | DELETE | [`Backend::delete_document`] |
//! | `/upload_document`      | POST   | [`Backend::upload_document`] |
//! | `/upload_profile_pic`   | POST   | [`Backend::upload_profile_pic`] |
//! | `/update_profile`       | POST   | [`Backend::update_profile`] |

pub mod dto;
mod error;
mod http;

pub use dto::*;
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;

use async_trait::async_trait;

/// The remote service, one method per endpoint.
///
/// Controllers depend on this trait only, so they can be driven against
/// any transport (or a test double) without a live server.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<StatusResponse>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<StatusResponse>;

    /// End the server session. The response body is irrelevant.
    async fn logout(&self) -> ClientResult<()>;

    async fn user_info(&self) -> ClientResult<UserInfoResponse>;

    async fn ask_question(&self, question: &str) -> ClientResult<AnswerResponse>;

    async fn chat_history(&self) -> ClientResult<ChatHistoryResponse>;

    async fn documents(&self) -> ClientResult<DocumentListResponse>;

    async fn delete_document(&self, id: &str) -> ClientResult<StatusResponse>;

    async fn upload_document(&self, file: UploadFile) -> ClientResult<StatusResponse>;

    async fn upload_profile_pic(&self, file: UploadFile) -> ClientResult<ProfilePicResponse>;

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<StatusResponse>;

    /// Cache-busted URL under which a stored profile picture is served
    fn profile_pic_url(&self, filename: &str) -> String;
}

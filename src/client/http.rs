//! reqwest-backed implementation of [`Backend`]

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::dto::*;
use super::error::{ClientError, ClientResult};
use super::Backend;
use crate::config::ServerConfig;

/// HTTP client for the document assistant service.
///
/// The login session is a server-set cookie, kept in the client's
/// cookie store for the lifetime of this value.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    profile_pics_path: String,
}

impl HttpBackend {
    /// Create a new backend client for the given server
    pub fn new(config: &ServerConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            profile_pics_path: format!("/{}", config.profile_pics_path.trim_matches('/')),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        decode(response).await
    }

    async fn post_file<T: DeserializeOwned>(&self, path: &str, file: UploadFile) -> ClientResult<T> {
        tracing::debug!(path, file = %file.name, bytes = file.size(), "POST multipart");
        let part = multipart::Part::bytes(file.bytes).file_name(file.name);
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        decode(response).await
    }
}

/// Parse a JSON body regardless of status; the service reports most
/// failures as `success: false` with a 200.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response.bytes().await.map_err(ClientError::from_transport)?;

    match serde_json::from_slice(&body) {
        Ok(value) => Ok(value),
        Err(e) if status.is_success() => Err(ClientError::Decode(e)),
        Err(_) => Err(ClientError::Http {
            status: status.as_u16(),
            message: String::from_utf8_lossy(&body).trim().to_string(),
        }),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> ClientResult<StatusResponse> {
        self.post_json("/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<StatusResponse> {
        self.post_json("/register", request).await
    }

    async fn logout(&self) -> ClientResult<()> {
        self.client
            .get(self.url("/logout"))
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        Ok(())
    }

    async fn user_info(&self) -> ClientResult<UserInfoResponse> {
        self.get_json("/api/user_info").await
    }

    async fn ask_question(&self, question: &str) -> ClientResult<AnswerResponse> {
        let body = QuestionRequest {
            question: question.to_string(),
        };
        self.post_json("/ask_question", &body).await
    }

    async fn chat_history(&self) -> ClientResult<ChatHistoryResponse> {
        self.get_json("/get_chat_history").await
    }

    async fn documents(&self) -> ClientResult<DocumentListResponse> {
        self.get_json("/get_documents").await
    }

    async fn delete_document(&self, id: &str) -> ClientResult<StatusResponse> {
        let path = format!("/delete_document/{}", urlencoding::encode(id));
        tracing::debug!(path = %path, "DELETE");

        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        decode(response).await
    }

    async fn upload_document(&self, file: UploadFile) -> ClientResult<StatusResponse> {
        self.post_file("/upload_document", file).await
    }

    async fn upload_profile_pic(&self, file: UploadFile) -> ClientResult<ProfilePicResponse> {
        self.post_file("/upload_profile_pic", file).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<StatusResponse> {
        self.post_json("/update_profile", update).await
    }

    fn profile_pic_url(&self, filename: &str) -> String {
        format!(
            "{}{}/{}?{}",
            self.base_url,
            self.profile_pics_path,
            urlencoding::encode(filename),
            chrono::Utc::now().timestamp_millis()
        )
    }
}

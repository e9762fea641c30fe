//! Test doubles shared by the controller tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::client::*;
use crate::config::UiConfig;
use crate::ui::*;

/// Canned answer of one mock endpoint
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Transport,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> ClientResult<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Transport => Err(ClientError::Unavailable),
        }
    }
}

pub fn ok_status(message: &str) -> Reply<StatusResponse> {
    Reply::Ok(StatusResponse {
        success: true,
        message: message.to_string(),
    })
}

pub fn declined(message: &str) -> Reply<StatusResponse> {
    Reply::Ok(StatusResponse {
        success: false,
        message: message.to_string(),
    })
}

pub fn doc(id: &str, filename: &str) -> Document {
    Document {
        id: id.to_string(),
        filename: filename.to_string(),
        upload_date: "2024-01-05T14:30:00".to_string(),
    }
}

/// In-memory [`Backend`] that records every call
pub struct MockBackend {
    calls: Mutex<Vec<String>>,
    pub login: Mutex<Reply<StatusResponse>>,
    pub register: Mutex<Reply<StatusResponse>>,
    pub user_info: Mutex<Reply<UserInfoResponse>>,
    pub answer: Mutex<Reply<AnswerResponse>>,
    pub history: Mutex<Reply<ChatHistoryResponse>>,
    pub documents: Mutex<Reply<DocumentListResponse>>,
    pub delete: Mutex<Reply<StatusResponse>>,
    pub upload: Mutex<Reply<StatusResponse>>,
    pub profile_pic: Mutex<Reply<ProfilePicResponse>>,
    pub update: Mutex<Reply<StatusResponse>>,
    /// Held endpoints wait for a notification before answering
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            login: Mutex::new(ok_status("Login successful")),
            register: Mutex::new(ok_status("Registered successfully")),
            user_info: Mutex::new(Reply::Ok(UserInfoResponse {
                success: true,
                user: Some(UserProfile {
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                    profile_pic: DEFAULT_AVATAR.to_string(),
                }),
                message: None,
            })),
            answer: Mutex::new(Reply::Ok(AnswerResponse {
                success: true,
                answer: Some("An answer".to_string()),
                sources: Vec::new(),
                message: None,
            })),
            history: Mutex::new(Reply::Ok(ChatHistoryResponse::default())),
            documents: Mutex::new(Reply::Ok(DocumentListResponse {
                documents: Some(Vec::new()),
                message: None,
            })),
            delete: Mutex::new(ok_status("Document deleted successfully")),
            upload: Mutex::new(ok_status("Document uploaded successfully")),
            profile_pic: Mutex::new(Reply::Ok(ProfilePicResponse {
                success: true,
                profile_pic: Some("1_me.png".to_string()),
                message: "Profile picture updated".to_string(),
            })),
            update: Mutex::new(ok_status("Profile updated")),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn set<T>(slot: &Mutex<Reply<T>>, reply: Reply<T>) {
        *slot.lock().unwrap() = reply;
    }

    pub fn set_documents(&self, documents: Vec<Document>) {
        Self::set(
            &self.documents,
            Reply::Ok(DocumentListResponse {
                documents: Some(documents),
                message: None,
            }),
        );
    }

    /// Hold `endpoint` ("login", "ask", "upload", "documents", ...) until
    /// the returned handle is notified; one notification releases one call
    pub fn hold(&self, endpoint: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(endpoint, gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == endpoint).count()
    }

    fn record(&self, endpoint: &str) {
        self.calls.lock().unwrap().push(endpoint.to_string());
    }

    async fn wait_gate(&self, endpoint: &str) {
        let gate = self.gates.lock().unwrap().get(endpoint).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn login(&self, _request: &LoginRequest) -> ClientResult<StatusResponse> {
        self.record("login");
        self.wait_gate("login").await;
        self.login.lock().unwrap().get()
    }

    async fn register(&self, _request: &RegisterRequest) -> ClientResult<StatusResponse> {
        self.record("register");
        self.wait_gate("register").await;
        self.register.lock().unwrap().get()
    }

    async fn logout(&self) -> ClientResult<()> {
        self.record("logout");
        Ok(())
    }

    async fn user_info(&self) -> ClientResult<UserInfoResponse> {
        self.record("user_info");
        self.wait_gate("user_info").await;
        self.user_info.lock().unwrap().get()
    }

    async fn ask_question(&self, question: &str) -> ClientResult<AnswerResponse> {
        self.record(&format!("ask:{}", question));
        self.wait_gate("ask").await;
        self.answer.lock().unwrap().get()
    }

    async fn chat_history(&self) -> ClientResult<ChatHistoryResponse> {
        self.record("history");
        self.wait_gate("history").await;
        self.history.lock().unwrap().get()
    }

    async fn documents(&self) -> ClientResult<DocumentListResponse> {
        self.record("documents");
        self.wait_gate("documents").await;
        self.documents.lock().unwrap().get()
    }

    async fn delete_document(&self, id: &str) -> ClientResult<StatusResponse> {
        self.record(&format!("delete:{}", id));
        self.delete.lock().unwrap().get()
    }

    async fn upload_document(&self, file: UploadFile) -> ClientResult<StatusResponse> {
        self.record(&format!("upload:{}", file.name));
        self.wait_gate("upload").await;
        self.upload.lock().unwrap().get()
    }

    async fn upload_profile_pic(&self, file: UploadFile) -> ClientResult<ProfilePicResponse> {
        self.record(&format!("profile_pic:{}", file.name));
        self.profile_pic.lock().unwrap().get()
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<StatusResponse> {
        self.record(&format!("update:{}", update.name));
        self.update.lock().unwrap().get()
    }

    fn profile_pic_url(&self, filename: &str) -> String {
        format!("http://test/static/profile_pics/{}?1", filename)
    }
}

/// Everything a controller asked the view to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Notify(NotificationKind, String),
    Loading(FormId, bool),
    Redirect(Redirect),
    Activate(Section),
    Header(&'static str),
    Message(ChatMessage),
    ClearTranscript,
    ClearInput,
    Placeholder(PlaceholderId),
    RemovePlaceholder(PlaceholderId),
    Documents(DocumentsView),
    Confirm(String),
    DropHighlight(bool),
    ShowProgress(String),
    Progress(f64),
    HideProgress,
    ResetFileInput,
    ProfileFields(String, String),
    ProfilePicture(String),
    ClearPassword,
}

/// [`View`] that records calls instead of drawing
pub struct RecordingView {
    events: Mutex<Vec<Event>>,
    confirm_answer: AtomicBool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
        }
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notify(kind, message) => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn progress_values(&self) -> Vec<f64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Progress(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl View for RecordingView {
    fn notify(&self, notification: &Notification) {
        self.push(Event::Notify(notification.kind, notification.message.clone()));
    }

    fn set_loading(&self, form: FormId, loading: bool) {
        self.push(Event::Loading(form, loading));
    }

    fn redirect(&self, to: Redirect, _after: Duration) {
        self.push(Event::Redirect(to));
    }

    fn activate_section(&self, section: Section) {
        self.push(Event::Activate(section));
    }

    fn set_header(&self, header: SectionHeader) {
        self.push(Event::Header(header.title));
    }

    fn append_message(&self, message: &ChatMessage) {
        self.push(Event::Message(message.clone()));
    }

    fn clear_transcript(&self) {
        self.push(Event::ClearTranscript);
    }

    fn clear_chat_input(&self) {
        self.push(Event::ClearInput);
    }

    fn show_placeholder(&self, id: PlaceholderId) {
        self.push(Event::Placeholder(id));
    }

    fn remove_placeholder(&self, id: PlaceholderId) {
        self.push(Event::RemovePlaceholder(id));
    }

    fn render_documents(&self, documents: &DocumentsView) {
        self.push(Event::Documents(documents.clone()));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.push(Event::Confirm(prompt.to_string()));
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn set_drop_highlight(&self, active: bool) {
        self.push(Event::DropHighlight(active));
    }

    fn show_progress(&self, label: &str) {
        self.push(Event::ShowProgress(label.to_string()));
    }

    fn set_progress(&self, percent: f64) {
        self.push(Event::Progress(percent));
    }

    fn hide_progress(&self) {
        self.push(Event::HideProgress);
    }

    fn reset_file_input(&self) {
        self.push(Event::ResetFileInput);
    }

    fn set_profile_fields(&self, name: &str, email: &str) {
        self.push(Event::ProfileFields(name.to_string(), email.to_string()));
    }

    fn set_profile_picture(&self, url: &str) {
        self.push(Event::ProfilePicture(url.to_string()));
    }

    fn clear_password_field(&self) {
        self.push(Event::ClearPassword);
    }
}

/// UI timings shrunk so tests never sleep for long
pub fn fast_ui() -> UiConfig {
    UiConfig {
        progress_tick_ms: 1,
        progress_settle_ms: 0,
        redirect_delay_ms: 0,
        ..UiConfig::default()
    }
}

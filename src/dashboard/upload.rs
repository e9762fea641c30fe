//! Upload pipeline
//!
//! One document upload at a time. Progress is a synthetic approximation:
//! the HTTP client exposes no upload progress, so a ticker grows the bar by
//! random steps up to a cap and it snaps to 100% once the server answers.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::Dashboard;
use crate::client::{Backend, UploadFile};
use crate::outcome::{Outcome, Submission};
use crate::ui::{NotificationKind, View};
use crate::util::{validate_file, DOCUMENT_EXTENSIONS};

/// Advance the synthetic progress value by `step`, never past `cap`
pub fn next_progress(current: f64, step: f64, cap: f64) -> f64 {
    (current + step).min(cap)
}

/// Background task animating the progress bar; aborted on drop
struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    fn start<V: View + 'static>(view: Arc<V>, tick: Duration, max_step: f64, cap: f64) -> Self {
        let handle = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut progress = 0.0;
            let mut interval = tokio::time::interval(tick);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                progress = next_progress(progress, rng.gen::<f64>() * max_step, cap);
                view.set_progress(progress);
            }
        });

        Self { handle }
    }

    /// Abort the ticker and wait until it can no longer touch the view
    async fn stop(mut self) {
        self.handle.abort();
        let _ = (&mut self.handle).await;
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Upload progress panel; hidden and zeroed when dropped
struct ProgressPanel<'a, V: View> {
    view: &'a V,
}

impl<'a, V: View> ProgressPanel<'a, V> {
    fn show(view: &'a V, label: &str) -> Self {
        view.show_progress(label);
        Self { view }
    }
}

impl<V: View> Drop for ProgressPanel<'_, V> {
    fn drop(&mut self) {
        self.view.hide_progress();
        self.view.set_progress(0.0);
    }
}

impl<B, V> Dashboard<B, V>
where
    B: Backend + 'static,
    V: View + 'static,
{
    pub fn drag_over(&self) {
        self.view.set_drop_highlight(true);
    }

    pub fn drag_leave(&self) {
        self.view.set_drop_highlight(false);
    }

    /// Files dropped onto the upload area
    pub async fn drop_files(&self, files: Vec<UploadFile>) -> Vec<Outcome> {
        self.view.set_drop_highlight(false);
        self.handle_files(files).await
    }

    /// The file picker only opens while no upload is running
    pub fn can_browse(&self) -> bool {
        !self.uploading.load(Ordering::Acquire)
    }

    /// Validate and upload a batch of picked or dropped files.
    ///
    /// Files outside the allow-list are reported one by one; the rest are
    /// uploaded in order. The whole batch is ignored while an upload runs.
    pub async fn handle_files(&self, files: Vec<UploadFile>) -> Vec<Outcome> {
        if !self.can_browse() {
            tracing::debug!(count = files.len(), "upload in progress, ignoring files");
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            if validate_file(&file.name, DOCUMENT_EXTENSIONS) {
                outcomes.push(self.upload_file(file).await);
            } else {
                self.notify(
                    NotificationKind::Error,
                    &format!(
                        "Invalid file type: {}. Supported formats: PDF, DOCX, TXT, CSV",
                        file.name
                    ),
                );
                outcomes.push(Outcome::Rejected);
            }
        }
        outcomes
    }

    /// Upload one document, unless another upload is already in flight
    pub async fn upload_file(&self, file: UploadFile) -> Outcome {
        let Some(_submission) = Submission::begin(&self.uploading) else {
            tracing::debug!(file = %file.name, "upload already in flight, dropping");
            return Outcome::Skipped;
        };

        tracing::debug!(file = %file.name, size = file.size(), "uploading document");
        let panel = ProgressPanel::show(&*self.view, &format!("Uploading {}...", file.name));

        let ticker = ProgressTicker::start(
            self.view.clone(),
            self.settings.progress_tick(),
            self.settings.progress_max_step,
            self.settings.progress_cap,
        );
        let result = self.backend.upload_document(file).await;
        ticker.stop().await;

        let outcome = match result {
            Ok(response) => {
                self.view.set_progress(100.0);
                tokio::time::sleep(self.settings.progress_settle()).await;

                if response.success {
                    self.notify(NotificationKind::Success, &response.message);
                    self.load_documents().await;
                    self.view.reset_file_input();
                    Outcome::Succeeded
                } else {
                    self.notify(NotificationKind::Error, &response.message);
                    Outcome::Declined
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload request failed");
                self.notify(NotificationKind::Error, "Error uploading file");
                Outcome::Failed
            }
        };

        drop(panel);
        outcome
    }
}

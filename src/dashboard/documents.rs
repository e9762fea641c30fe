//! Document listing and deletion

use super::Dashboard;
use crate::client::{Backend, Document};
use crate::outcome::Outcome;
use crate::ui::{DocumentsView, NotificationKind, View};

const DELETE_PROMPT: &str = "Are you sure you want to delete this document?";

impl<B, V> Dashboard<B, V>
where
    B: Backend + 'static,
    V: View + 'static,
{
    /// Last document list received from the server
    pub async fn documents(&self) -> Vec<Document> {
        self.state.read().await.documents.clone()
    }

    /// Fetch the document list and re-render the grid.
    ///
    /// The list is replaced wholesale; on any failure it is left as is.
    pub async fn load_documents(&self) {
        self.refresh_documents(None).await;
    }

    pub(super) async fn refresh_documents(&self, epoch: Option<u64>) {
        let response = match self.backend.documents().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load documents");
                return;
            }
        };

        let Some(documents) = response.documents else {
            tracing::debug!(message = ?response.message, "document list unavailable");
            return;
        };

        let rendered = {
            let mut state = self.state.write().await;
            if epoch.is_some_and(|epoch| epoch != state.nav_epoch) {
                tracing::debug!("discarding document list from a previous navigation");
                return;
            }
            state.documents = documents;
            tracing::debug!(count = state.documents.len(), "documents loaded");
            DocumentsView::from_documents(&state.documents)
        };

        self.view.render_documents(&rendered);
    }

    /// Delete a document after the user confirms, then refresh the list
    pub async fn delete_document(&self, id: &str) -> Outcome {
        if !self.view.confirm(DELETE_PROMPT) {
            return Outcome::Skipped;
        }

        match self.backend.delete_document(id).await {
            Ok(response) if response.success => {
                self.notify(NotificationKind::Success, &response.message);
                self.load_documents().await;
                Outcome::Succeeded
            }
            Ok(response) => {
                self.notify(NotificationKind::Error, &response.message);
                Outcome::Declined
            }
            Err(e) => {
                tracing::warn!(error = %e, id, "delete request failed");
                self.notify(NotificationKind::Error, "Error deleting document");
                Outcome::Failed
            }
        }
    }
}

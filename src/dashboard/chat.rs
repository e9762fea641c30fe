//! Chat pipeline: questions, answers and the transcript

use super::Dashboard;
use crate::client::Backend;
use crate::outcome::{Outcome, Submission};
use crate::ui::{ChatMessage, PlaceholderId, View};

const DECLINED_FALLBACK: &str = "Sorry, I encountered an error.";
const TRANSPORT_FALLBACK: &str = "Sorry, I encountered an error while processing your question.";

/// "Thinking..." placeholder, removed from the transcript when dropped
struct Placeholder<'a, V: View> {
    view: &'a V,
    id: PlaceholderId,
}

impl<'a, V: View> Placeholder<'a, V> {
    fn show(view: &'a V) -> Self {
        let id = PlaceholderId::new();
        view.show_placeholder(id);
        Self { view, id }
    }
}

impl<V: View> Drop for Placeholder<'_, V> {
    fn drop(&mut self) {
        self.view.remove_placeholder(self.id);
    }
}

impl<B, V> Dashboard<B, V>
where
    B: Backend + 'static,
    V: View + 'static,
{
    /// Submit the chat form.
    ///
    /// The question is echoed immediately, followed by a "Thinking..."
    /// placeholder that is removed once the request resolves. A submit
    /// while another question is pending is dropped.
    pub async fn submit_question(&self, input: &str) -> Outcome {
        let question = input.trim();
        if question.is_empty() {
            return Outcome::Skipped;
        }

        let Some(_submission) = Submission::begin(&self.chat_in_flight) else {
            tracing::debug!("question already pending, ignoring submit");
            return Outcome::Skipped;
        };

        self.view.append_message(&ChatMessage::user(question));
        self.view.clear_chat_input();

        let placeholder = Placeholder::show(&*self.view);
        let result = self.backend.ask_question(question).await;
        drop(placeholder);

        match result {
            Ok(response) if response.success => {
                let answer = response.answer.unwrap_or_default();
                self.view
                    .append_message(&ChatMessage::assistant(answer, response.sources));
                Outcome::Succeeded
            }
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DECLINED_FALLBACK.to_string());
                self.view
                    .append_message(&ChatMessage::assistant(message, Vec::new()));
                Outcome::Declined
            }
            Err(e) => {
                tracing::warn!(error = %e, "question request failed");
                self.view
                    .append_message(&ChatMessage::assistant(TRANSPORT_FALLBACK, Vec::new()));
                Outcome::Failed
            }
        }
    }

    /// Replace the transcript with the server-side history
    pub async fn load_chat_history(&self) {
        self.refresh_chat_history(None).await;
    }

    pub(super) async fn refresh_chat_history(&self, epoch: Option<u64>) {
        let response = match self.backend.chat_history().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load chat history");
                return;
            }
        };

        if !response.success || response.history.is_empty() {
            return;
        }
        if !self.is_current(epoch).await {
            tracing::debug!("discarding chat history from a previous navigation");
            return;
        }

        self.view.clear_transcript();
        for exchange in response.history {
            self.view.append_message(&ChatMessage::user(exchange.question));
            self.view
                .append_message(&ChatMessage::assistant(exchange.answer, exchange.sources));
        }
    }
}

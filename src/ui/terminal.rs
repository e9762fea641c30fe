//! Terminal front-end
//!
//! Renders controller output on stdout: colored notifications, a spinner
//! while a question is pending and a bar for upload progress. Input (shell
//! lines and confirmations) is read through one buffered reader so neither
//! consumes the other's lines.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;
use std::time::Duration;

use super::state::{Section, SectionHeader};
use super::view::*;

pub struct TerminalView {
    /// Answer every confirmation with "yes"
    assume_yes: bool,
    input: Mutex<Box<dyn BufRead + Send>>,
    placeholders: Mutex<HashMap<PlaceholderId, ProgressBar>>,
    progress: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    /// Terminal view reading from stdin
    pub fn new(assume_yes: bool) -> Self {
        Self::with_input(assume_yes, Box::new(BufReader::new(io::stdin())))
    }

    pub fn with_input(assume_yes: bool, input: Box<dyn BufRead + Send>) -> Self {
        Self {
            assume_yes,
            input: Mutex::new(input),
            placeholders: Mutex::new(HashMap::new()),
            progress: Mutex::new(None),
        }
    }

    /// Next input line without its line ending; `None` at end of input.
    ///
    /// Blocks; call it from a blocking task inside a runtime.
    pub fn read_line(&self) -> io::Result<Option<String>> {
        let mut input = self
            .input
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "input reader poisoned"))?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn progress_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos:>3}%")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new(false)
    }
}

impl View for TerminalView {
    fn notify(&self, notification: &Notification) {
        let line = match notification.kind {
            NotificationKind::Success => format!("{} {}", "✓".bold().green(), notification.message),
            NotificationKind::Error => format!("{} {}", "✕".bold().red(), notification.message),
        };
        println!("{}", line);
    }

    fn set_loading(&self, form: FormId, loading: bool) {
        tracing::trace!(?form, loading, "form loading state");
    }

    fn redirect(&self, to: Redirect, after: Duration) {
        tracing::debug!(path = to.path(), ?after, "redirect");
    }

    fn activate_section(&self, section: Section) {
        tracing::debug!(%section, "section activated");
    }

    fn set_header(&self, header: SectionHeader) {
        println!("\n{}", header.title.bold());
        println!("{}", header.subtitle.dimmed());
    }

    fn append_message(&self, message: &ChatMessage) {
        let who = match message.sender {
            Sender::User => "You".bold().cyan(),
            Sender::Assistant => "Assistant".bold().green(),
        };
        println!("{}: {}", who, message.content);
        if let Some(sources) = message.sources_line() {
            println!("   {}", sources.dimmed());
        }
    }

    fn clear_transcript(&self) {
        println!("{}", "── chat history ──".dimmed());
    }

    fn clear_chat_input(&self) {}

    fn show_placeholder(&self, id: PlaceholderId) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_draw_target(ProgressDrawTarget::stderr());
        spinner.set_message("Thinking...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut placeholders) = self.placeholders.lock() {
            placeholders.insert(id, spinner);
        }
    }

    fn remove_placeholder(&self, id: PlaceholderId) {
        let spinner = self
            .placeholders
            .lock()
            .ok()
            .and_then(|mut placeholders| placeholders.remove(&id));
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }

    fn render_documents(&self, documents: &DocumentsView) {
        match documents {
            DocumentsView::Empty => {
                println!("{}", "No documents uploaded yet".bold());
                println!(
                    "{}",
                    "Upload your first document to get started with the AI assistant".dimmed()
                );
            }
            DocumentsView::Cards(cards) => {
                for card in cards {
                    println!(
                        "{}  {}  {}",
                        card.id.dimmed(),
                        card.filename.bold(),
                        card.uploaded.dimmed()
                    );
                }
            }
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }

    fn set_drop_highlight(&self, active: bool) {
        tracing::trace!(active, "drop highlight");
    }

    fn show_progress(&self, label: &str) {
        let bar = ProgressBar::new(100);
        bar.set_draw_target(ProgressDrawTarget::stderr());
        bar.set_style(Self::progress_style());
        bar.set_message(label.to_string());

        if let Ok(mut progress) = self.progress.lock() {
            if let Some(previous) = progress.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn set_progress(&self, percent: f64) {
        if let Ok(progress) = self.progress.lock() {
            if let Some(bar) = progress.as_ref() {
                bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
            }
        }
    }

    fn hide_progress(&self) {
        let bar = self.progress.lock().ok().and_then(|mut progress| progress.take());
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }

    fn reset_file_input(&self) {}

    fn set_profile_fields(&self, name: &str, email: &str) {
        println!("{:>8} {}", "Name:".bold(), name);
        println!("{:>8} {}", "Email:".bold(), email);
    }

    fn set_profile_picture(&self, url: &str) {
        println!("{:>8} {}", "Picture:".bold(), url);
    }

    fn clear_password_field(&self) {}
}

//! Result of a user action, and the guard for actions in flight

use std::sync::atomic::{AtomicBool, Ordering};

/// How a form submission or UI action ended.
///
/// None of these are errors from the caller's point of view: every path
/// has already been reported to the user through the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened: empty input, a duplicate in-flight action,
    /// or a declined confirmation
    Skipped,
    /// Client-side validation failed; no request was sent
    Rejected,
    /// The server reported success
    Succeeded,
    /// The server answered `success: false`
    Declined,
    /// The request never produced a usable response
    Failed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }

    /// Higher is worse: a failed request outranks a refusal, which
    /// outranks anything that never reached the server
    fn severity(self) -> u8 {
        match self {
            Outcome::Succeeded => 0,
            Outcome::Skipped => 1,
            Outcome::Rejected => 2,
            Outcome::Declined => 3,
            Outcome::Failed => 4,
        }
    }

    /// Worst outcome of a batch; an empty batch succeeded
    pub fn worst(outcomes: &[Outcome]) -> Outcome {
        outcomes
            .iter()
            .copied()
            .max_by_key(|outcome| outcome.severity())
            .unwrap_or(Outcome::Succeeded)
    }
}

/// Holds an in-flight flag; clears it however the action ends, including
/// when the handler future is dropped mid-request
pub(crate) struct Submission<'a>(&'a AtomicBool);

impl<'a> Submission<'a> {
    /// `None` if another action already holds the flag
    pub(crate) fn begin(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Submission(flag))
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

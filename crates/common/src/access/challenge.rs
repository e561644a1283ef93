use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::permissions::OperationKind;

/// Message shown alongside a repeated challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeNotice {
    /// The previous submission was empty.
    PasscodeRequired,
    /// The backend rejected the previous submission.
    IncorrectPasscode,
}

impl fmt::Display for ChallengeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeNotice::PasscodeRequired => write!(f, "Please enter a passcode"),
            ChallengeNotice::IncorrectPasscode => write!(f, "Incorrect passcode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRequest {
    pub file_name: String,
    pub kind: OperationKind,
    pub notice: Option<ChallengeNotice>,
}

#[derive(Clone, PartialEq, Eq)]
pub enum ChallengeResponse {
    Submitted(String),
    Cancelled,
}

impl fmt::Debug for ChallengeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeResponse::Submitted(input) if input.is_empty() => {
                f.write_str("Submitted(<empty>)")
            }
            ChallengeResponse::Submitted(_) => f.write_str("Submitted(<redacted>)"),
            ChallengeResponse::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// The user-facing passcode prompt.
///
/// One call is one showing of the prompt: it resolves when the user confirms
/// (possibly with empty input) or dismisses it.
#[async_trait::async_trait]
pub trait Challenge: Send + Sync {
    async fn request(&self, request: &ChallengeRequest) -> ChallengeResponse;
}

struct Pending {
    id: u64,
    file_name: String,
    cancel: oneshot::Sender<()>,
}

/// Owner of the single shared challenge affordance.
///
/// At most one challenge is live. Presenting a new one cancels whatever was
/// pending, and the replaced caller sees [`ChallengeResponse::Cancelled`].
#[derive(Default)]
pub struct ChallengeSlot {
    pending: Mutex<Option<Pending>>,
    next_id: AtomicU64,
}

impl ChallengeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn present(
        &self,
        challenge: &dyn Challenge,
        request: &ChallengeRequest,
    ) -> ChallengeResponse {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let replaced = self.pending.lock().replace(Pending {
            id,
            file_name: request.file_name.clone(),
            cancel: cancel_tx,
        });
        if let Some(prior) = replaced {
            tracing::debug!(
                replaced = %prior.file_name,
                by = %request.file_name,
                "replacing pending passcode challenge"
            );
            let _ = prior.cancel.send(());
        }

        let response = tokio::select! {
            response = challenge.request(request) => response,
            _ = cancel_rx => ChallengeResponse::Cancelled,
        };

        let mut pending = self.pending.lock();
        if pending.as_ref().map(|p| p.id) == Some(id) {
            pending.take();
        }
        response
    }

    pub fn is_pending(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// File name of the challenge currently on screen, if any.
    pub fn pending_file(&self) -> Option<String> {
        self.pending.lock().as_ref().map(|p| p.file_name.clone())
    }
}

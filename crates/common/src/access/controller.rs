use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::permissions::{OperationKind, PermissionSet};
use crate::session::{Passcode, Session};

use super::challenge::{
    Challenge, ChallengeNotice, ChallengeRequest, ChallengeResponse, ChallengeSlot,
};
use super::error::AccessError;
use super::operation::{GuardedRequest, OperationOutput};
use super::{FileOperations, PermissionQuery};

/// What to do when the permission query itself fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionFallback {
    /// Abort the operation with the query's error.
    #[default]
    FailClosed,
    /// Continue with [`PermissionSet::fallback`].
    FailOpen,
}

/// Where the passcode for an attempt came from.
enum Candidate {
    Cached(Passcode),
    Fresh(Passcode),
}

impl Candidate {
    fn passcode(&self) -> &Passcode {
        match self {
            Candidate::Cached(p) | Candidate::Fresh(p) => p,
        }
    }
}

enum State {
    AwaitingPasscode(Option<ChallengeNotice>),
    Executing(Option<Candidate>),
}

/// Mediates view/edit/delete/download on files that may be
/// permission-restricted and passcode-locked.
///
/// Permissions are fetched fresh for every call. Passcodes that the backend
/// accepted are cached in the [`Session`] and reused optimistically: a cached
/// passcode is only found stale when the operation itself is rejected, which
/// evicts it and re-challenges once.
pub struct AccessController {
    session: Arc<Session>,
    permissions: Arc<dyn PermissionQuery>,
    files: Arc<dyn FileOperations>,
    challenge: Arc<dyn Challenge>,
    slot: ChallengeSlot,
    fallback: PermissionFallback,
}

impl AccessController {
    pub fn new(
        session: Arc<Session>,
        permissions: Arc<dyn PermissionQuery>,
        files: Arc<dyn FileOperations>,
        challenge: Arc<dyn Challenge>,
    ) -> Self {
        Self {
            session,
            permissions,
            files,
            challenge,
            slot: ChallengeSlot::new(),
            fallback: PermissionFallback::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: PermissionFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn challenge_slot(&self) -> &ChallengeSlot {
        &self.slot
    }

    /// Run `request` against `file_name`, challenging for a passcode if the
    /// file is locked.
    pub async fn perform(
        &self,
        request: GuardedRequest,
        file_name: &str,
    ) -> Result<OperationOutput, AccessError> {
        if file_name.is_empty() {
            return Err(AccessError::Failed("file name is required".to_string()));
        }
        let kind = request.kind();

        let permissions = self.check_permission(kind, file_name).await?;

        let mut state = if !permissions.is_locked {
            State::Executing(None)
        } else if let Some(cached) = self.session.passcodes().get(file_name) {
            tracing::debug!(file = %file_name, %kind, "using cached passcode");
            State::Executing(Some(Candidate::Cached(cached)))
        } else {
            State::AwaitingPasscode(None)
        };

        loop {
            state = match state {
                State::AwaitingPasscode(notice) => {
                    self.await_passcode(kind, file_name, notice).await?
                }
                State::Executing(candidate) => {
                    match self.execute(&request, file_name, candidate).await? {
                        Ok(output) => return Ok(output),
                        Err(next) => next,
                    }
                }
            };
        }
    }

    async fn check_permission(
        &self,
        kind: OperationKind,
        file_name: &str,
    ) -> Result<PermissionSet, AccessError> {
        let permissions = match self.permissions.permissions(file_name).await {
            Ok(permissions) => permissions,
            Err(e) => match self.fallback {
                PermissionFallback::FailClosed => {
                    tracing::warn!(file = %file_name, error = %e, "permission query failed");
                    return Err(AccessError::Failed(e.to_string()));
                }
                PermissionFallback::FailOpen => {
                    tracing::warn!(
                        file = %file_name,
                        error = %e,
                        "permission query failed, continuing with fallback permissions"
                    );
                    PermissionSet::fallback()
                }
            },
        };

        if !permissions.allows(kind, self.session.role()) {
            tracing::info!(file = %file_name, %kind, "permission denied");
            return Err(AccessError::PermissionDenied {
                kind,
                file_name: file_name.to_string(),
            });
        }
        Ok(permissions)
    }

    async fn await_passcode(
        &self,
        kind: OperationKind,
        file_name: &str,
        notice: Option<ChallengeNotice>,
    ) -> Result<State, AccessError> {
        let request = ChallengeRequest {
            file_name: file_name.to_string(),
            kind,
            notice,
        };
        tracing::debug!(file = %file_name, %kind, ?notice, "awaiting passcode");

        match self.slot.present(self.challenge.as_ref(), &request).await {
            ChallengeResponse::Cancelled => {
                tracing::info!(file = %file_name, %kind, "passcode challenge cancelled");
                Err(AccessError::Cancelled)
            }
            ChallengeResponse::Submitted(input) if input.is_empty() => Ok(State::AwaitingPasscode(
                Some(ChallengeNotice::PasscodeRequired),
            )),
            ChallengeResponse::Submitted(input) => Ok(State::Executing(Some(Candidate::Fresh(
                Passcode::new(input),
            )))),
        }
    }

    /// One attempt against the backend. `Ok(Err(state))` means the attempt
    /// was rejected as locked and the flow continues in `state`.
    async fn execute(
        &self,
        request: &GuardedRequest,
        file_name: &str,
        candidate: Option<Candidate>,
    ) -> Result<Result<OperationOutput, State>, AccessError> {
        let passcode = candidate.as_ref().map(Candidate::passcode);
        tracing::debug!(
            file = %file_name,
            kind = %request.kind(),
            with_passcode = passcode.is_some(),
            "executing file operation"
        );

        let result = self.files.execute(file_name, request, passcode).await;
        match result {
            Ok(output) => {
                if let Some(Candidate::Fresh(passcode)) = candidate {
                    self.session.passcodes().remember(file_name, passcode);
                }
                Ok(Ok(output))
            }
            Err(e) if e.is_locked() => {
                let next = match candidate {
                    Some(Candidate::Cached(stale)) => {
                        tracing::debug!(file = %file_name, "cached passcode rejected, evicting");
                        self.session.passcodes().evict_if_matches(file_name, &stale);
                        State::AwaitingPasscode(None)
                    }
                    Some(Candidate::Fresh(_)) => {
                        State::AwaitingPasscode(Some(ChallengeNotice::IncorrectPasscode))
                    }
                    // locked after the permission query said otherwise
                    None => State::AwaitingPasscode(None),
                };
                Ok(Err(next))
            }
            Err(e) => {
                tracing::warn!(file = %file_name, kind = %request.kind(), error = %e, "file operation failed");
                Err(AccessError::Failed(e.message))
            }
        }
    }
}

impl std::fmt::Debug for AccessController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessController")
            .field("session", &self.session)
            .field("fallback", &self.fallback)
            .field("challenge_pending", &self.slot.is_pending())
            .finish()
    }
}

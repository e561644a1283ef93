use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::access::{Challenge, ChallengeRequest, ChallengeResponse};
use crate::session::{Passcode, Session};

/// A passcode prompt that replays a fixed script of answers.
///
/// Once the script runs out every further prompt is cancelled. Each prompt is
/// recorded, together with what the watched session had cached for the file at
/// the moment the prompt appeared.
#[derive(Default)]
pub struct ScriptedChallenge {
    script: Mutex<VecDeque<ChallengeResponse>>,
    prompts: Mutex<Vec<ChallengeRequest>>,
    cache_at_prompt: Mutex<Vec<Option<Passcode>>>,
    watched: Mutex<Option<Arc<Session>>>,
}

impl ScriptedChallenge {
    /// Answer each prompt with the next passcode in `answers`.
    pub fn new<I, S>(answers: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_responses(
            answers
                .into_iter()
                .map(|a| ChallengeResponse::Submitted(a.into())),
        )
    }

    pub fn with_responses<I>(responses: I) -> Arc<Self>
    where
        I: IntoIterator<Item = ChallengeResponse>,
    {
        Arc::new(Self {
            script: Mutex::new(responses.into_iter().collect()),
            ..Default::default()
        })
    }

    /// A prompt the user always dismisses.
    pub fn cancelling() -> Arc<Self> {
        Self::with_responses([])
    }

    pub fn watch(&self, session: Arc<Session>) {
        *self.watched.lock() = Some(session);
    }

    pub fn prompts(&self) -> Vec<ChallengeRequest> {
        self.prompts.lock().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn cache_at_prompt(&self) -> Vec<Option<Passcode>> {
        self.cache_at_prompt.lock().clone()
    }
}

#[async_trait::async_trait]
impl Challenge for ScriptedChallenge {
    async fn request(&self, request: &ChallengeRequest) -> ChallengeResponse {
        let cached = self
            .watched
            .lock()
            .as_ref()
            .and_then(|s| s.passcodes().get(&request.file_name));
        self.cache_at_prompt.lock().push(cached);
        self.prompts.lock().push(request.clone());

        self.script
            .lock()
            .pop_front()
            .unwrap_or(ChallengeResponse::Cancelled)
    }
}

use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

use common::access::{Challenge, ChallengeRequest, ChallengeResponse};

/// Line-oriented input shared by the shell and the passcode prompt.
///
/// Prompts go to stderr so that stdout stays clean for command output.
pub struct Terminal {
    input: Mutex<Box<dyn AsyncBufRead + Unpin + Send>>,
}

impl Terminal {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader(reader: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        Self {
            input: Mutex::new(Box::new(reader)),
        }
    }

    /// Show `prompt` and read one line without its line ending.
    /// `None` on end of input.
    pub async fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        if !prompt.is_empty() {
            let mut stderr = io::stderr();
            write!(stderr, "{}", prompt)?;
            stderr.flush()?;
        }

        let mut input = self.input.lock().await;
        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal").finish_non_exhaustive()
    }
}

/// Passcode prompt on the terminal. End of input (Ctrl-D) cancels.
///
/// Input is echoed.
#[derive(Debug, Clone)]
pub struct TerminalChallenge {
    terminal: Arc<Terminal>,
}

impl TerminalChallenge {
    pub fn new(terminal: Arc<Terminal>) -> Self {
        Self { terminal }
    }
}

#[async_trait::async_trait]
impl Challenge for TerminalChallenge {
    async fn request(&self, request: &ChallengeRequest) -> ChallengeResponse {
        if let Some(notice) = request.notice {
            eprintln!("{}", notice);
        }
        let prompt = format!(
            "{} is locked. Passcode to {} it (Ctrl-D to cancel): ",
            request.file_name, request.kind
        );

        match self.terminal.read_line(&prompt).await {
            Ok(Some(input)) => ChallengeResponse::Submitted(input),
            Ok(None) => {
                eprintln!();
                ChallengeResponse::Cancelled
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read passcode");
                ChallengeResponse::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use common::permissions::OperationKind;

    fn challenge_over(input: &'static str) -> TerminalChallenge {
        TerminalChallenge::new(Arc::new(Terminal::from_reader(input.as_bytes())))
    }

    fn request() -> ChallengeRequest {
        ChallengeRequest {
            file_name: "secret.txt".to_string(),
            kind: OperationKind::View,
            notice: None,
        }
    }

    #[tokio::test]
    async fn test_lines_are_submitted_verbatim() {
        let challenge = challenge_over(" pass word \r\n   \n\n");
        assert_eq!(
            challenge.request(&request()).await,
            ChallengeResponse::Submitted(" pass word ".to_string())
        );
        assert_eq!(
            challenge.request(&request()).await,
            ChallengeResponse::Submitted("   ".to_string())
        );
        assert_eq!(
            challenge.request(&request()).await,
            ChallengeResponse::Submitted(String::new())
        );
    }

    #[tokio::test]
    async fn test_end_of_input_cancels() {
        let challenge = challenge_over("");
        assert_eq!(challenge.request(&request()).await, ChallengeResponse::Cancelled);
    }

    #[tokio::test]
    async fn test_read_line_without_trailing_newline() {
        let terminal = Terminal::from_reader("ls --sort size".as_bytes());
        assert_eq!(
            terminal.read_line("").await.unwrap().as_deref(),
            Some("ls --sort size")
        );
        assert_eq!(terminal.read_line("").await.unwrap(), None);
    }
}

//! Cooperative confirmation step
//!
//! Stateful actions (borrowing) suspend until the user answers a binary
//! prompt. The workflow parks on a oneshot channel; there is no timeout, and
//! the only way out is the user's explicit choice (or the shell dropping the
//! prompt, which counts as a cancellation).

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// The user's binary choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// What the shell shows while the workflow is suspended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub message: String,
}

impl ConfirmPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Resolution channel for a single suspended workflow
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: ConfirmPrompt) -> Decision;
}

/// Confirms everything. For non-interactive shells and tests.
pub struct AutoConfirm;

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _prompt: ConfirmPrompt) -> Decision {
        Decision::Confirmed
    }
}

/// A prompt handed to the shell, carrying its resolution channel
#[derive(Debug)]
pub struct ConfirmRequest {
    pub prompt: ConfirmPrompt,
    respond: oneshot::Sender<Decision>,
}

impl ConfirmRequest {
    pub fn resolve(self, decision: Decision) {
        let _ = self.respond.send(decision);
    }
}

/// Channel-backed confirmer: forwards prompts to the shell and suspends the
/// calling workflow until the matching [`ConfirmRequest`] is resolved.
#[derive(Clone)]
pub struct PromptConfirmer {
    requests: mpsc::UnboundedSender<ConfirmRequest>,
}

impl PromptConfirmer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConfirmRequest>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (Self { requests }, rx)
    }
}

#[async_trait]
impl Confirm for PromptConfirmer {
    async fn confirm(&self, prompt: ConfirmPrompt) -> Decision {
        let (respond, answer) = oneshot::channel();
        let request = ConfirmRequest { prompt, respond };
        if self.requests.send(request).is_err() {
            // No shell listening; treat as a declined prompt.
            return Decision::Cancelled;
        }
        answer.await.unwrap_or(Decision::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_with_the_users_choice() {
        let (confirmer, mut requests) = PromptConfirmer::new();
        let pending = tokio::spawn(async move {
            confirmer
                .confirm(ConfirmPrompt::new("Borrow \"Dune\"?"))
                .await
        });

        let request = requests.recv().await.expect("prompt forwarded");
        assert_eq!(request.prompt.message, "Borrow \"Dune\"?");
        request.resolve(Decision::Confirmed);

        assert_eq!(pending.await.unwrap(), Decision::Confirmed);
    }

    #[tokio::test]
    async fn dropped_prompt_counts_as_cancelled() {
        let (confirmer, mut requests) = PromptConfirmer::new();
        let pending = tokio::spawn(async move {
            confirmer.confirm(ConfirmPrompt::new("Borrow?")).await
        });

        let request = requests.recv().await.expect("prompt forwarded");
        drop(request);

        assert_eq!(pending.await.unwrap(), Decision::Cancelled);
    }

    #[tokio::test]
    async fn no_listening_shell_cancels() {
        let (confirmer, requests) = PromptConfirmer::new();
        drop(requests);
        let decision = confirmer.confirm(ConfirmPrompt::new("Borrow?")).await;
        assert_eq!(decision, Decision::Cancelled);
    }
}

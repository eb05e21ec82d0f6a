//! Guarded action workflow
//!
//! Every user-initiated operation (borrow, download, login, signup) runs
//! through the same state machine:
//!
//! ```text
//! Idle -> Confirming (optional) -> InFlight -> Idle
//! ```
//!
//! The engine guarantees at most one in-flight invocation per action, issues
//! the operation only after a positive confirmation, and always lands back in
//! `Idle`, including when the caller's future is dropped mid-flight.

pub mod confirm;
pub mod nav;
pub mod notify;

use std::future::Future;

use tokio::sync::watch;

use crate::error::ClientResult;
use self::confirm::Decision;

/// Observable state of a single guarded action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    /// Suspended, waiting for the user's binary choice
    Confirming,
    /// The one network call is outstanding
    InFlight,
}

impl ActionState {
    pub fn is_idle(self) -> bool {
        matches!(self, ActionState::Idle)
    }
}

/// How a single invocation of a guarded action resolved
#[derive(Debug)]
pub enum RunOutcome<T> {
    /// The operation ran; carries its result
    Completed(ClientResult<T>),
    /// The user declined the confirmation; nothing was invoked
    Cancelled,
    /// The precondition was false; the action is not offered right now
    NotOffered,
    /// Another invocation of this action is still unresolved
    Busy,
}

impl<T> RunOutcome<T> {
    pub fn completed(&self) -> Option<&ClientResult<T>> {
        match self {
            RunOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

/// One guarded trigger. Shells subscribe to [`GuardedAction::watch`] and
/// disable the trigger whenever the state is not `Idle`.
pub struct GuardedAction {
    state: watch::Sender<ActionState>,
}

impl Default for GuardedAction {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardedAction {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ActionState::Idle);
        Self { state }
    }

    pub fn watch(&self) -> watch::Receiver<ActionState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> ActionState {
        *self.state.borrow()
    }

    pub fn is_idle(&self) -> bool {
        self.current().is_idle()
    }

    /// Run an unconfirmed action: precondition, then the operation.
    pub async fn run<T, Fut>(
        &self,
        precondition: impl FnOnce() -> bool,
        operation: impl FnOnce() -> Fut,
    ) -> RunOutcome<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        self.drive(precondition, None::<std::future::Ready<Decision>>, operation)
            .await
    }

    /// Run a confirmed action: precondition, suspend on `confirmation`, then
    /// the operation only if the user confirmed.
    pub async fn run_with_confirmation<T, C, Fut>(
        &self,
        precondition: impl FnOnce() -> bool,
        confirmation: C,
        operation: impl FnOnce() -> Fut,
    ) -> RunOutcome<T>
    where
        C: Future<Output = Decision>,
        Fut: Future<Output = ClientResult<T>>,
    {
        self.drive(precondition, Some(confirmation), operation).await
    }

    async fn drive<T, C, Fut>(
        &self,
        precondition: impl FnOnce() -> bool,
        confirmation: Option<C>,
        operation: impl FnOnce() -> Fut,
    ) -> RunOutcome<T>
    where
        C: Future<Output = Decision>,
        Fut: Future<Output = ClientResult<T>>,
    {
        if !precondition() {
            return RunOutcome::NotOffered;
        }

        let entry = if confirmation.is_some() {
            ActionState::Confirming
        } else {
            ActionState::InFlight
        };
        if !self.try_enter(entry) {
            return RunOutcome::Busy;
        }
        // From here every exit path goes through the guard, so the trigger
        // re-enables even if this future is dropped mid-suspension.
        let _guard = ResetToIdle { state: &self.state };

        if let Some(confirmation) = confirmation {
            match confirmation.await {
                Decision::Cancelled => return RunOutcome::Cancelled,
                Decision::Confirmed => {
                    self.state.send_replace(ActionState::InFlight);
                }
            }
        }

        RunOutcome::Completed(operation().await)
    }

    /// Atomically claim the action if it is idle.
    fn try_enter(&self, next: ActionState) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_idle() {
                *state = next;
                true
            } else {
                false
            }
        })
    }
}

struct ResetToIdle<'a> {
    state: &'a watch::Sender<ActionState>,
}

impl Drop for ResetToIdle<'_> {
    fn drop(&mut self) {
        self.state.send_replace(ActionState::Idle);
    }
}

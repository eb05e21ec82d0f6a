//! Borrow and download workflows

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    error::{ClientError, ClientResult},
    gateway::LibraryApi,
    models::{
        item::ItemDetails,
        loan::{holds_item, LoanRecord},
    },
    platform::FileSaver,
    session::SessionStore,
    workflow::{
        confirm::{Confirm, ConfirmPrompt},
        nav::{Navigator, Route},
        notify::Notifier,
        ActionState, GuardedAction, RunOutcome,
    },
};

/// Inputs of the borrow precondition, computed before the trigger renders.
///
/// `permits` is the pure, synchronous check the workflow runs; the shell uses
/// the same value to decide whether to offer the button at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorrowGate {
    pub account_permitted: bool,
    pub copies_available: bool,
    pub already_held: bool,
    /// False when the loan list could not be fetched; the gate stays closed
    /// rather than guessing.
    pub loans_known: bool,
}

impl BorrowGate {
    pub fn permits(&self) -> bool {
        self.account_permitted && self.copies_available && self.loans_known && !self.already_held
    }
}

pub struct LoansService {
    api: Arc<dyn LibraryApi>,
    session: SessionStore,
    notifier: Notifier,
    navigator: Navigator,
    borrow_action: GuardedAction,
    download_action: GuardedAction,
}

impl LoansService {
    pub(crate) fn new(
        api: Arc<dyn LibraryApi>,
        session: SessionStore,
        notifier: Notifier,
        navigator: Navigator,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            navigator,
            borrow_action: GuardedAction::new(),
            download_action: GuardedAction::new(),
        }
    }

    pub fn borrow_state(&self) -> watch::Receiver<ActionState> {
        self.borrow_action.watch()
    }

    pub fn download_state(&self) -> watch::Receiver<ActionState> {
        self.download_action.watch()
    }

    /// Active and past loans of the signed-in user
    pub async fn my_loans(&self) -> ClientResult<Vec<LoanRecord>> {
        if !self.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        self.api.my_loans().await
    }

    /// Evaluate the borrow precondition for one item view.
    ///
    /// The loan-list fetch here is auxiliary: when it fails, the failure is
    /// logged and swallowed, and the gate is left closed.
    pub async fn borrow_gate(&self, item: &ItemDetails) -> BorrowGate {
        let Some(identity) = self.session.identity() else {
            return BorrowGate::default();
        };
        let account_permitted = identity.account_type.may_borrow();
        let copies_available = item.has_available_copy();

        match self.api.my_loans().await {
            Ok(loans) => BorrowGate {
                account_permitted,
                copies_available,
                already_held: holds_item(&loans, item.id),
                loans_known: true,
            },
            Err(err) => {
                tracing::debug!(error = %err, item_id = item.id, "loan list unavailable, leaving borrow gate closed");
                BorrowGate {
                    account_permitted,
                    copies_available,
                    already_held: false,
                    loans_known: false,
                }
            }
        }
    }

    /// Borrow a physical item.
    ///
    /// Suspends on the confirmation prompt; a decline issues no network call.
    /// Success flashes a notice and lands on the loans view.
    pub async fn borrow(
        &self,
        item: &ItemDetails,
        gate: BorrowGate,
        confirmer: &dyn Confirm,
    ) -> RunOutcome<LoanRecord> {
        let prompt = ConfirmPrompt::new(format!("Borrow \"{}\"?", item.title));
        let api = Arc::clone(&self.api);
        let item_id = item.id;

        let outcome = self
            .borrow_action
            .run_with_confirmation(
                || gate.permits(),
                confirmer.confirm(prompt),
                move || async move { api.borrow_item(item_id).await },
            )
            .await;

        if let Some(result) = outcome.completed() {
            match result {
                Ok(_) => {
                    tracing::info!(item_id, "item borrowed");
                    self.notifier
                        .success(format!("\"{}\" is yours to read", item.title));
                    self.navigator.go(Route::MyLoans);
                }
                Err(err) => self.notifier.error(err.user_message()),
            }
        }
        outcome
    }

    /// Download a digital item and hand the bytes to the file saver.
    ///
    /// No confirmation step; the save is the terminal effect and there is no
    /// navigation afterwards.
    pub async fn download(
        &self,
        item: &ItemDetails,
        saver: &dyn FileSaver,
    ) -> RunOutcome<PathBuf> {
        let offered = self.session.is_authenticated() && item.is_digital();
        let api = Arc::clone(&self.api);
        let item_id = item.id;
        let file_name = item
            .file_name
            .clone()
            .unwrap_or_else(|| format!("item-{}.bin", item.id));

        let outcome = self
            .download_action
            .run(
                || offered,
                move || async move {
                    let contents = api.download_item(item_id).await?;
                    let path = saver.save(&file_name, contents).await?;
                    Ok(path)
                },
            )
            .await;

        if let Some(result) = outcome.completed() {
            match result {
                Ok(path) => {
                    tracing::info!(item_id, path = %path.display(), "item downloaded");
                    self.notifier
                        .success(format!("Saved to {}", path.display()));
                }
                Err(err) => self.notifier.error(err.user_message()),
            }
        }
        outcome
    }
}

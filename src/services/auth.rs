//! Authentication workflows (login / signup)

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    gateway::LibraryApi,
    models::{
        auth::{AuthGrant, LoginForm, LoginPayload, SignupForm, SignupPayload, SignupReceipt},
        user::Identity,
    },
    platform::ClipboardAccess,
    session::SessionStore,
    workflow::{
        nav::{Navigator, Route},
        notify::Notifier,
        ActionState, GuardedAction, RunOutcome,
    },
};

pub struct AuthService {
    api: Arc<dyn LibraryApi>,
    session: SessionStore,
    notifier: Notifier,
    navigator: Navigator,
    /// Stable per-process identifier sent with logins for trusted-device
    /// handling on the server
    device_id: Uuid,
    login_action: GuardedAction,
    signup_action: GuardedAction,
}

impl AuthService {
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
            device_id: Uuid::new_v4(),
            login_action: GuardedAction::new(),
            signup_action: GuardedAction::new(),
        }
    }

    pub fn login_state(&self) -> watch::Receiver<ActionState> {
        self.login_action.watch()
    }

    pub fn signup_state(&self) -> watch::Receiver<ActionState> {
        self.signup_action.watch()
    }

    /// Sign in and populate the session store.
    ///
    /// The secret travels only inside the request payload; it is neither
    /// retained nor logged. On failure the session is left untouched.
    pub async fn login(&self, form: LoginForm) -> RunOutcome<Identity> {
        let valid = form.validate().is_ok();
        let payload = LoginPayload::from_form(form, self.device_id.to_string());
        let api = Arc::clone(&self.api);

        let outcome = self
            .login_action
            .run(move || valid, move || async move { api.login(payload).await })
            .await;

        match outcome {
            RunOutcome::Completed(Ok(grant)) => {
                let AuthGrant {
                    identity,
                    access_token,
                    refresh_token,
                } = grant;
                self.session
                    .set(identity.clone(), access_token, refresh_token);
                tracing::info!(member_code = %identity.member_code, "logged in");
                self.notifier
                    .success(format!("Welcome back, {}", identity.display_name));
                self.navigator.go(Route::Home);
                RunOutcome::Completed(Ok(identity))
            }
            RunOutcome::Completed(Err(err)) => {
                self.notifier.error(err.user_message());
                RunOutcome::Completed(Err(err))
            }
            RunOutcome::Cancelled => RunOutcome::Cancelled,
            RunOutcome::NotOffered => RunOutcome::NotOffered,
            RunOutcome::Busy => RunOutcome::Busy,
        }
    }

    /// Create an account.
    ///
    /// Success lands on the confirmation view carrying the generated member
    /// code; that code cannot be retrieved again through this flow, so the
    /// workflow never navigates past it and never signs the user in.
    pub async fn signup(&self, form: SignupForm) -> RunOutcome<SignupReceipt> {
        let valid = form.validate().is_ok();
        let payload = SignupPayload::from(form);
        let api = Arc::clone(&self.api);

        let outcome = self
            .signup_action
            .run(move || valid, move || async move { api.signup(payload).await })
            .await;

        if let Some(result) = outcome.completed() {
            match result {
                Ok(receipt) => {
                    tracing::info!(member_code = %receipt.member_code, "account created");
                    self.notifier.success("Account created");
                    self.navigator.go(Route::SignupComplete {
                        member_code: receipt.member_code.clone(),
                    });
                }
                Err(err) => self.notifier.error(err.user_message()),
            }
        }
        outcome
    }

    /// Drop the session and return to the login view. Idempotent.
    pub fn logout(&self) {
        self.session.clear();
        self.navigator.go(Route::Login);
    }

    /// Swap the token pair using the stored refresh token.
    ///
    /// The session is replaced as a unit on success and cleared on failure;
    /// it is never left half-updated.
    pub async fn refresh_session(&self) -> ClientResult<Identity> {
        let refresh_token = self
            .session
            .refresh_token()
            .ok_or(ClientError::NotAuthenticated)?;
        match self.api.refresh(refresh_token).await {
            Ok(grant) => {
                let AuthGrant {
                    identity,
                    access_token,
                    refresh_token,
                } = grant;
                self.session
                    .set(identity.clone(), access_token, refresh_token);
                Ok(identity)
            }
            Err(err) => {
                tracing::debug!(error = %err, "token refresh failed, dropping session");
                self.session.clear();
                Err(err)
            }
        }
    }

    /// Copy the member code shown on the signup confirmation view.
    pub fn copy_member_code(
        &self,
        clipboard: &dyn ClipboardAccess,
        member_code: &str,
    ) -> ClientResult<()> {
        clipboard.copy_text(member_code)?;
        self.notifier.success("Member code copied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    use crate::{
        error::GENERIC_ERROR_MESSAGE,
        gateway::MockLibraryApi,
        models::user::AccountTypeSlug,
        workflow::notify::{Notice, NoticeKind},
    };

    fn identity() -> Identity {
        Identity {
            id: 42,
            member_code: "MEM-00042".to_string(),
            display_name: "Alice".to_string(),
            email: None,
            account_type: AccountTypeSlug::Member,
            joined_date: None,
        }
    }

    fn grant() -> AuthGrant {
        AuthGrant {
            identity: identity(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    fn login_form() -> LoginForm {
        LoginForm {
            identifier: "MEM-00042".to_string(),
            password: "correct horse".to_string(),
        }
    }

    fn signup_form() -> SignupForm {
        SignupForm {
            display_name: "Alice".to_string(),
            email: None,
            password: "correct horse".to_string(),
            password_confirm: "correct horse".to_string(),
            account_type: AccountTypeSlug::Member,
        }
    }

    struct Harness {
        service: AuthService,
        session: SessionStore,
        notices: crate::workflow::notify::NoticeStream,
        routes: crate::workflow::nav::RouteStream,
    }

    fn harness(api: MockLibraryApi) -> Harness {
        let session = SessionStore::new();
        let (notifier, notices) = Notifier::new();
        let (navigator, routes) = Navigator::new();
        let service = AuthService::new(Arc::new(api), session.clone(), notifier, navigator);
        Harness {
            service,
            session,
            notices,
            routes,
        }
    }

    #[tokio::test]
    async fn login_populates_session_and_navigates_home() {
        let mut api = MockLibraryApi::new();
        api.expect_login().times(1).returning(|_| Ok(grant()));
        let h = harness(api);

        let outcome = h.service.login(login_form()).await;
        assert!(matches!(outcome, RunOutcome::Completed(Ok(_))));

        let session = h.session.get().expect("session populated");
        assert_eq!(session.identity, identity());
        assert_eq!(session.access_token, "access");
        assert_eq!(session.refresh_token, "refresh");

        drop(h.service);
        let routes: Vec<_> = h.routes.collect().await;
        assert_eq!(routes, vec![Route::Home]);
    }

    #[tokio::test]
    async fn login_failure_shows_server_message_verbatim() {
        let mut api = MockLibraryApi::new();
        api.expect_login()
            .times(1)
            .returning(|_| Err(ClientError::Remote("Invalid credentials".to_string())));
        let mut h = harness(api);

        let outcome = h.service.login(login_form()).await;
        assert!(matches!(outcome, RunOutcome::Completed(Err(_))));
        assert!(h.session.get().is_none());

        let notice = h.notices.next().await.expect("error notice");
        assert_eq!(
            notice,
            Notice {
                kind: NoticeKind::Error,
                message: "Invalid credentials".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn login_without_response_body_shows_generic_fallback() {
        let mut api = MockLibraryApi::new();
        api.expect_login()
            .times(1)
            .returning(|_| Err(ClientError::Decode("empty body".to_string())));
        let mut h = harness(api);

        h.service.login(login_form()).await;

        let notice = h.notices.next().await.expect("error notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, GENERIC_ERROR_MESSAGE);
        assert!(!notice.message.is_empty());
    }

    #[tokio::test]
    async fn invalid_login_form_is_not_offered_and_calls_nothing() {
        let mut api = MockLibraryApi::new();
        api.expect_login().times(0);
        let h = harness(api);

        let outcome = h
            .service
            .login(LoginForm {
                identifier: String::new(),
                password: String::new(),
            })
            .await;
        assert!(matches!(outcome, RunOutcome::NotOffered));
        assert!(h.session.get().is_none());
    }

    #[tokio::test]
    async fn signup_lands_on_confirmation_with_the_literal_code() {
        let mut api = MockLibraryApi::new();
        api.expect_signup().times(1).returning(|_| {
            Ok(SignupReceipt {
                member_code: "MEM-00042".to_string(),
            })
        });
        let h = harness(api);

        let outcome = h.service.signup(signup_form()).await;
        match outcome {
            RunOutcome::Completed(Ok(receipt)) => {
                assert_eq!(receipt.member_code, "MEM-00042");
            }
            other => panic!("expected completed signup, got {:?}", other),
        }

        // Signup must not sign the user in.
        assert!(h.session.get().is_none());

        // The only navigation is onto the confirmation view; nothing moves
        // the user away from the one place the code is visible.
        drop(h.service);
        let routes: Vec<_> = h.routes.collect().await;
        assert_eq!(
            routes,
            vec![Route::SignupComplete {
                member_code: "MEM-00042".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn signup_with_mismatched_passwords_calls_nothing() {
        let mut api = MockLibraryApi::new();
        api.expect_signup().times(0);
        let h = harness(api);

        let mut form = signup_form();
        form.password_confirm = "different".to_string();
        let outcome = h.service.signup(form).await;
        assert!(matches!(outcome, RunOutcome::NotOffered));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let mut api = MockLibraryApi::new();
        api.expect_login().times(1).returning(|_| Ok(grant()));
        let h = harness(api);

        h.service.login(login_form()).await;
        h.service.logout();
        h.service.logout();
        assert!(h.session.get().is_none());
    }

    #[tokio::test]
    async fn failed_refresh_clears_the_session() {
        let mut api = MockLibraryApi::new();
        api.expect_login().times(1).returning(|_| Ok(grant()));
        api.expect_refresh()
            .times(1)
            .returning(|_| Err(ClientError::Remote("Refresh token expired".to_string())));
        let h = harness(api);

        h.service.login(login_form()).await;
        assert!(h.session.is_authenticated());

        let result = h.service.refresh_session().await;
        assert!(result.is_err());
        assert!(h.session.get().is_none());
    }

    #[tokio::test]
    async fn copy_member_code_uses_the_clipboard() {
        use std::sync::Mutex;

        struct FakeClipboard(Mutex<Option<String>>);
        impl ClipboardAccess for FakeClipboard {
            fn copy_text(&self, text: &str) -> ClientResult<()> {
                *self.0.lock().unwrap() = Some(text.to_string());
                Ok(())
            }
        }

        let api = MockLibraryApi::new();
        let h = harness(api);
        let clipboard = FakeClipboard(Mutex::new(None));

        h.service
            .copy_member_code(&clipboard, "MEM-00042")
            .unwrap();
        assert_eq!(
            clipboard.0.lock().unwrap().as_deref(),
            Some("MEM-00042")
        );
    }
}

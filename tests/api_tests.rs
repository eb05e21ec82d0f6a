//! Integration tests against a running Elidune server
//!
//! These talk to a live instance on localhost and are ignored by default.
//! Run with: cargo test --test api_tests -- --ignored

use elidune_client::{
    models::auth::{LoginForm, SignupForm},
    models::user::AccountTypeSlug,
    workflow::RunOutcome,
    AppConfig, AppState,
};

fn state() -> AppState {
    let config = AppConfig::default();
    let (state, _channels) = AppState::new(config).expect("client core builds");
    state
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_signup_then_login() -> anyhow::Result<()> {
    let state = state();

    let signup = state
        .services
        .auth
        .signup(SignupForm {
            display_name: "Integration Tester".to_string(),
            email: None,
            password: "integration-pass".to_string(),
            password_confirm: "integration-pass".to_string(),
            account_type: AccountTypeSlug::Member,
        })
        .await;

    let receipt = match signup {
        RunOutcome::Completed(result) => result?,
        other => anyhow::bail!("signup did not complete: {:?}", other),
    };
    assert!(receipt.member_code.starts_with("MEM-"));

    let login = state
        .services
        .auth
        .login(LoginForm {
            identifier: receipt.member_code.clone(),
            password: "integration-pass".to_string(),
        })
        .await;
    assert!(matches!(login, RunOutcome::Completed(Ok(_))));
    assert!(state.session.is_authenticated());
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let state = state();

    let login = state
        .services
        .auth
        .login(LoginForm {
            identifier: "MEM-99999".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    match login {
        RunOutcome::Completed(Err(err)) => {
            assert!(!err.user_message().is_empty());
        }
        other => panic!("expected rejected login, got {:?}", other),
    }
    assert!(!state.session.is_authenticated());
}

#[tokio::test]
#[ignore]
async fn test_list_items() {
    let state = state();

    let page = state
        .services
        .catalog
        .list_items()
        .await
        .expect("catalog listing");
    assert!(page.total >= page.items.len() as i64);
}

//! Authentication endpoints

use serde::Serialize;

use super::Http;
use crate::{
    error::ClientResult,
    models::auth::{AuthGrant, LoginPayload, SignupPayload, SignupReceipt},
};

#[derive(Serialize)]
struct RefreshPayload<'a> {
    refresh_token: &'a str,
}

#[derive(Clone)]
pub struct AuthGateway {
    http: Http,
}

impl AuthGateway {
    pub(crate) fn new(http: Http) -> Self {
        Self { http }
    }

    pub async fn login(&self, payload: &LoginPayload) -> ClientResult<AuthGrant> {
        self.http.post("/auth/login", payload).await
    }

    pub async fn signup(&self, payload: &SignupPayload) -> ClientResult<SignupReceipt> {
        self.http.post("/auth/signup", payload).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> ClientResult<AuthGrant> {
        self.http
            .post("/auth/refresh", &RefreshPayload { refresh_token })
            .await
    }
}

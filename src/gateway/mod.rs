//! HTTP gateway to the Elidune server
//!
//! One `reqwest` client behind resource-scoped sub-clients. All JSON
//! endpoints answer with the same envelope, `{ "data": ... }` on success or
//! `{ "error": "..." }` on failure; the error string is surfaced verbatim.

pub mod auth;
pub mod items;
pub mod loans;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    config::GatewayConfig,
    error::{ClientError, ClientResult},
    models::{
        auth::{AuthGrant, LoginPayload, SignupPayload, SignupReceipt},
        item::{ItemDetails, ItemPage},
        loan::LoanRecord,
        user::Identity,
    },
    session::SessionStore,
};

/// Everything the workflows need from the remote service.
///
/// Fronted by a trait so workflow tests can count and script calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryApi: Send + Sync {
    async fn login(&self, payload: LoginPayload) -> ClientResult<AuthGrant>;
    async fn signup(&self, payload: SignupPayload) -> ClientResult<SignupReceipt>;
    async fn refresh(&self, refresh_token: String) -> ClientResult<AuthGrant>;
    async fn list_items(&self) -> ClientResult<ItemPage>;
    async fn item_details(&self, item_id: i32) -> ClientResult<ItemDetails>;
    async fn my_loans(&self) -> ClientResult<Vec<LoanRecord>>;
    async fn borrow_item(&self, item_id: i32) -> ClientResult<LoanRecord>;
    async fn download_item(&self, item_id: i32) -> ClientResult<Vec<u8>>;
}

/// Response envelope shared by all JSON endpoints
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    error: Option<String>,
}

/// Decode an envelope body into its payload or its verbatim error message.
fn interpret<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))?;
    if let Some(message) = envelope.error {
        return Err(ClientError::Remote(message));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::Decode("response carried neither data nor error".to_string()))
}

/// Shared request plumbing: base URL, timeout, bearer injection
#[derive(Clone)]
pub(crate) struct Http {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl Http {
    fn new(config: &GatewayConfig, session: SessionStore) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.access_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub(crate) fn require_identity(&self) -> ClientResult<Identity> {
        self.session.identity().ok_or(ClientError::NotAuthenticated)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let response = builder.send().await?;
        let body = response.bytes().await?;
        interpret(&body)
    }

    /// Fetch raw file contents. Failures still come back as the JSON
    /// envelope, so decode the body as one when the status is not success.
    pub(crate) async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if status.is_success() {
            return Ok(body.to_vec());
        }
        match interpret::<serde_json::Value>(&body) {
            Err(err) => Err(err),
            Ok(_) => Err(ClientError::Decode(format!(
                "unexpected {} response for file request",
                status
            ))),
        }
    }
}

/// Concrete gateway: the sub-clients plus the [`LibraryApi`] face
#[derive(Clone)]
pub struct Gateway {
    pub auth: auth::AuthGateway,
    pub items: items::ItemsGateway,
    pub loans: loans::LoansGateway,
}

impl Gateway {
    pub fn new(config: &GatewayConfig, session: SessionStore) -> ClientResult<Self> {
        let http = Http::new(config, session)?;
        Ok(Self {
            auth: auth::AuthGateway::new(http.clone()),
            items: items::ItemsGateway::new(http.clone()),
            loans: loans::LoansGateway::new(http),
        })
    }
}

#[async_trait]
impl LibraryApi for Gateway {
    async fn login(&self, payload: LoginPayload) -> ClientResult<AuthGrant> {
        self.auth.login(&payload).await
    }

    async fn signup(&self, payload: SignupPayload) -> ClientResult<SignupReceipt> {
        self.auth.signup(&payload).await
    }

    async fn refresh(&self, refresh_token: String) -> ClientResult<AuthGrant> {
        self.auth.refresh(&refresh_token).await
    }

    async fn list_items(&self) -> ClientResult<ItemPage> {
        self.items.list().await
    }

    async fn item_details(&self, item_id: i32) -> ClientResult<ItemDetails> {
        self.items.details(item_id).await
    }

    async fn my_loans(&self) -> ClientResult<Vec<LoanRecord>> {
        self.loans.my_loans().await
    }

    async fn borrow_item(&self, item_id: i32) -> ClientResult<LoanRecord> {
        self.loans.borrow(item_id).await
    }

    async fn download_item(&self, item_id: i32) -> ClientResult<Vec<u8>> {
        self.items.download(item_id).await
    }
}

//! Loan endpoints

use serde::Serialize;

use super::Http;
use crate::{error::ClientResult, models::loan::LoanRecord};

#[derive(Serialize)]
struct BorrowPayload {
    user_id: i32,
    item_id: i32,
}

#[derive(Clone)]
pub struct LoansGateway {
    http: Http,
}

impl LoansGateway {
    pub(crate) fn new(http: Http) -> Self {
        Self { http }
    }

    /// Active and past loans of the signed-in user
    pub async fn my_loans(&self) -> ClientResult<Vec<LoanRecord>> {
        let identity = self.http.require_identity()?;
        self.http
            .get(&format!("/users/{}/loans", identity.id))
            .await
    }

    pub async fn borrow(&self, item_id: i32) -> ClientResult<LoanRecord> {
        let identity = self.http.require_identity()?;
        self.http
            .post(
                "/loans",
                &BorrowPayload {
                    user_id: identity.id,
                    item_id,
                },
            )
            .await
    }
}

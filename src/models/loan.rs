//! Loan (borrow) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Loan lifecycle status.
///
/// The server reports these as strings; anything unrecognised maps to
/// `Unknown` rather than failing the whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Ongoing,
    Overdue,
    Returned,
    Lost,
    #[serde(other)]
    Unknown,
}

impl LoanStatus {
    /// Whether a loan in this status blocks borrowing the same item again.
    ///
    /// Only `Ongoing` and `Overdue` block; a returned or lost copy does not.
    pub fn blocks_reborrow(&self) -> bool {
        matches!(self, LoanStatus::Ongoing | LoanStatus::Overdue)
    }
}

/// A loan held by the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: i32,
    pub item_id: i32,
    pub item_title: String,
    pub status: LoanStatus,
    pub start_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub returned_date: Option<DateTime<Utc>>,
}

impl LoanRecord {
    /// The server decides overdueness; this only reads its verdict.
    pub fn is_overdue(&self) -> bool {
        self.status == LoanStatus::Overdue
    }
}

/// True when `loans` contains an active hold on `item_id`
pub fn holds_item(loans: &[LoanRecord], item_id: i32) -> bool {
    loans
        .iter()
        .any(|loan| loan.item_id == item_id && loan.status.blocks_reborrow())
}

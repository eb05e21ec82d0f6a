//! User identity model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account type slug (string identifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTypeSlug {
    Member,
    Librarian,
}

impl AccountTypeSlug {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountTypeSlug::Member => "member",
            AccountTypeSlug::Librarian => "librarian",
        }
    }

    /// Whether this account type may borrow physical items.
    ///
    /// Librarian accounts manage the collection through the staff interface
    /// and do not hold loans of their own.
    pub fn may_borrow(&self) -> bool {
        matches!(self, AccountTypeSlug::Member)
    }
}

impl std::fmt::Display for AccountTypeSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccountTypeSlug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(AccountTypeSlug::Member),
            "librarian" => Ok(AccountTypeSlug::Librarian),
            _ => Err(format!("Invalid account type slug: {}", s)),
        }
    }
}

/// The authenticated actor's profile as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i32,
    /// Generated member code, e.g. "MEM-00042"
    pub member_code: String,
    pub display_name: String,
    pub email: Option<String>,
    pub account_type: AccountTypeSlug,
    pub joined_date: Option<DateTime<Utc>>,
}

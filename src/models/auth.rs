//! Authentication request and response types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::{AccountTypeSlug, Identity};

/// Client-side password policy. The server stays authoritative.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Shape of generated member codes, e.g. "MEM-00042"
static MEMBER_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^MEM-\d{5}$").expect("member code pattern is valid")
});

/// Whether `identifier` looks like a generated member code rather than a
/// chosen login name. Used only to pick the credential field on the wire,
/// never to reject input.
pub fn is_member_code(identifier: &str) -> bool {
    MEMBER_CODE.is_match(identifier)
}

/// Login form input
#[derive(Clone, Validate, Deserialize)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup form input
#[derive(Clone, Validate, Deserialize)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub display_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
    pub account_type: AccountTypeSlug,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("account_type", &self.account_type)
            .finish()
    }
}

/// Login request body
#[derive(Serialize)]
pub struct LoginPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_code: Option<String>,
    pub password: String,
    /// Stable per-process device identifier for trusted-device handling
    pub device_id: String,
}

impl LoginPayload {
    /// Route the identifier to the right credential field.
    pub fn from_form(form: LoginForm, device_id: String) -> Self {
        let LoginForm { identifier, password } = form;
        if is_member_code(&identifier) {
            Self {
                login: None,
                member_code: Some(identifier),
                password,
                device_id,
            }
        } else {
            Self {
                login: Some(identifier),
                member_code: None,
                password,
                device_id,
            }
        }
    }
}

/// Signup request body
#[derive(Serialize)]
pub struct SignupPayload {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    pub account_type: AccountTypeSlug,
}

impl From<SignupForm> for SignupPayload {
    fn from(form: SignupForm) -> Self {
        Self {
            display_name: form.display_name,
            email: form.email,
            password: form.password,
            account_type: form.account_type,
        }
    }
}

/// Successful authentication response: identity plus the token pair
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    pub identity: Identity,
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful signup response.
///
/// The member code is generated server-side and cannot be retrieved again
/// through this flow; the shell must keep it visible until the user moves on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupReceipt {
    pub member_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_code_shape() {
        assert!(is_member_code("MEM-00042"));
        assert!(!is_member_code("MEM-42"));
        assert!(!is_member_code("alice"));
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            identifier: "".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_err());

        let form = LoginForm {
            identifier: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn signup_rejects_short_password() {
        let form = SignupForm {
            display_name: "Alice".to_string(),
            email: None,
            password: "short".to_string(),
            password_confirm: "short".to_string(),
            account_type: AccountTypeSlug::Member,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn signup_rejects_mismatched_confirmation() {
        let form = SignupForm {
            display_name: "Alice".to_string(),
            email: None,
            password: "correct horse".to_string(),
            password_confirm: "battery staple".to_string(),
            account_type: AccountTypeSlug::Member,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn payload_routes_member_code() {
        let payload = LoginPayload::from_form(
            LoginForm {
                identifier: "MEM-00042".to_string(),
                password: "pw".to_string(),
            },
            "device".to_string(),
        );
        assert_eq!(payload.member_code.as_deref(), Some("MEM-00042"));
        assert!(payload.login.is_none());
    }

    #[test]
    fn debug_never_prints_the_secret() {
        let form = LoginForm {
            identifier: "alice".to_string(),
            password: "hunter22".to_string(),
        };
        let printed = format!("{:?}", form);
        assert!(!printed.contains("hunter22"));
    }
}

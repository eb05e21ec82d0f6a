//! Error types for the Elidune client

use thiserror::Error;

/// Fallback message shown when the server gives us nothing usable
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Main client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl ClientError {
    /// The text a shell should show for this failure.
    ///
    /// Remote errors carry the server message verbatim; transport and decode
    /// failures fall back to [`GENERIC_ERROR_MESSAGE`] because there is
    /// nothing trustworthy to display.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) | ClientError::Remote(msg) => msg.clone(),
            ClientError::NotAuthenticated => "You must be logged in to do that.".to_string(),
            ClientError::File(_) => "Could not save the file.".to_string(),
            ClientError::Clipboard(_) => "Could not copy to the clipboard.".to_string(),
            ClientError::Transport(_) | ClientError::Decode(_) | ClientError::Config(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid input".to_string());
        ClientError::Validation(message)
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_message_shown_verbatim() {
        let err = ClientError::Remote("Invalid credentials".to_string());
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn decode_falls_back_to_generic_message() {
        let err = ClientError::Decode("empty body".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(!err.user_message().is_empty());
    }
}

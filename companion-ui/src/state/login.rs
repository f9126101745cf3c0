//! Login completion: store the token or explain why not.

use thiserror::Error;

use super::token::{StorageError, TokenStore};
use crate::api::{ApiError, LoginResponse};

pub const LOGIN_FAILED_ALERT: &str = "Incorrect username or password, please check and try again";
pub const SUBMIT_LABEL: &str = "Log in";
pub const VERIFYING_LABEL: &str = "Verifying...";

/// Route opened once the token is stored
pub const CHAT_ROUTE: &str = "/chat";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginFailure {
    #[error("Login rejected: {0}")]
    Rejected(ApiError),

    #[error("Could not save session: {0}")]
    Storage(StorageError),
}

impl LoginFailure {
    pub fn alert_text(&self) -> String {
        match self {
            LoginFailure::Rejected(_) => LOGIN_FAILED_ALERT.to_string(),
            LoginFailure::Storage(e) => format!("Could not save your session: {}", e),
        }
    }
}

/// Store the token from a login response. The stored token is only
/// touched when the backend accepted the credentials.
pub fn complete_login(
    tokens: &dyn TokenStore,
    result: Result<LoginResponse, ApiError>,
) -> Result<(), LoginFailure> {
    let response = result.map_err(LoginFailure::Rejected)?;
    tokens
        .set_token(&response.access_token)
        .map_err(LoginFailure::Storage)
}

/// What the login view does once an attempt settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// Leave the login view for this route
    Navigate(&'static str),
    /// Stay on the login view and show this text
    Alert(String),
}

impl From<Result<(), LoginFailure>> for LoginStep {
    fn from(outcome: Result<(), LoginFailure>) -> Self {
        match outcome {
            Ok(()) => LoginStep::Navigate(CHAT_ROUTE),
            Err(failure) => LoginStep::Alert(failure.alert_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::token::testing::MemoryTokens;

    #[test]
    fn test_success_stores_token() {
        let tokens = MemoryTokens::default();
        let result = Ok(LoginResponse {
            access_token: "abc".to_string(),
            token_type: Some("bearer".to_string()),
        });

        complete_login(&tokens, result).unwrap();
        assert_eq!(tokens.get_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_rejection_leaves_token_alone() {
        let tokens = MemoryTokens::default();
        *tokens.token.borrow_mut() = Some("previous".to_string());

        let failure = complete_login(&tokens, Err(ApiError::Status(400))).unwrap_err();
        assert_eq!(failure.alert_text(), LOGIN_FAILED_ALERT);
        assert_eq!(tokens.get_token().as_deref(), Some("previous"));
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let tokens = MemoryTokens {
            fail_writes: true,
            ..Default::default()
        };
        let result = Ok(LoginResponse {
            access_token: "abc".to_string(),
            token_type: None,
        });

        let failure = complete_login(&tokens, result).unwrap_err();
        assert!(matches!(failure, LoginFailure::Storage(_)));
        assert_eq!(tokens.get_token(), None);
    }

    #[test]
    fn test_success_opens_chat() {
        let tokens = MemoryTokens::default();
        let result = Ok(LoginResponse {
            access_token: "abc".to_string(),
            token_type: Some("bearer".to_string()),
        });

        let step = LoginStep::from(complete_login(&tokens, result));
        assert_eq!(step, LoginStep::Navigate(CHAT_ROUTE));
    }

    #[test]
    fn test_failure_stays_on_login() {
        let tokens = MemoryTokens::default();

        let step = LoginStep::from(complete_login(&tokens, Err(ApiError::Unauthorized)));
        assert_eq!(step, LoginStep::Alert(LOGIN_FAILED_ALERT.to_string()));
        assert_eq!(tokens.get_token(), None);
    }
}

//! Login Flow
//!
//! Exchanges a username and password for a bearer token and stores it.
//! The form is not validated locally; empty fields go to the backend as-is.

use thiserror::Error;

use crate::backend::{ChatBackend, ClientError, Credentials};
use crate::session::{TokenStore, TokenStoreError};

/// Text shown when the backend refuses the credentials or cannot be reached
pub const LOGIN_FAILED_ALERT: &str = "Incorrect username or password, please check and try again";

/// Submit control label at rest
pub const SUBMIT_LABEL: &str = "Log in";

/// Submit control label while the request is in flight
pub const VERIFYING_LABEL: &str = "Verifying...";

/// Login form state
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    loading: bool,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            loading: false,
        }
    }

    /// True while a login request is in flight; disables the submit control
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label of the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            VERIFYING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Submit the form.
    ///
    /// On success the token is stored under `token` and the caller moves
    /// to the chat view. On failure the stored token is left untouched.
    pub async fn submit<B, T>(&mut self, backend: &B, tokens: &T) -> Result<(), LoginFailure>
    where
        B: ChatBackend + ?Sized,
        T: TokenStore + ?Sized,
    {
        let LoginForm {
            username,
            password,
            loading,
        } = self;

        let _loading = LoadingGuard::acquire(loading);
        let credentials = Credentials::new(username.as_str(), password.as_str());

        let response = backend.login(&credentials).await.map_err(|e| {
            tracing::warn!(username = %credentials.username, error = %e, "Login failed");
            LoginFailure::Rejected(e)
        })?;

        tokens.set_token(&response.access_token)?;
        tracing::info!(username = %credentials.username, "Logged in");
        Ok(())
    }
}

/// Holds the loading flag up until dropped
struct LoadingGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// Why a login did not complete
#[derive(Debug, Error)]
pub enum LoginFailure {
    #[error("Login rejected: {0}")]
    Rejected(#[from] ClientError),

    #[error("Could not save session: {0}")]
    Store(#[from] TokenStoreError),
}

impl LoginFailure {
    /// Text shown to the user
    pub fn alert_text(&self) -> String {
        match self {
            LoginFailure::Rejected(_) => LOGIN_FAILED_ALERT.to_string(),
            LoginFailure::Store(e) => format!("Could not save your session: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ChatReply, LoginResponse};
    use crate::session::MemoryTokenStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeAuth {
        accepts: (&'static str, &'static str),
        seen: Mutex<Vec<(String, String)>>,
    }

    impl FakeAuth {
        fn new(username: &'static str, password: &'static str) -> Self {
            Self {
                accepts: (username, password),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for FakeAuth {
        async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
            self.seen
                .lock()
                .unwrap()
                .push((credentials.username.clone(), credentials.password.clone()));

            if (credentials.username.as_str(), credentials.password.as_str()) == self.accepts {
                Ok(LoginResponse {
                    access_token: "abc".to_string(),
                    token_type: Some("bearer".to_string()),
                })
            } else {
                Err(ClientError::ApiError {
                    status: 400,
                    message: "bad credentials".to_string(),
                })
            }
        }

        async fn chat(&self, _token: &str, _message: &str) -> Result<ChatReply, ClientError> {
            Err(ClientError::Unavailable)
        }
    }

    struct HangingAuth;

    #[async_trait]
    impl ChatBackend for HangingAuth {
        async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ClientError> {
            std::future::pending().await
        }

        async fn chat(&self, _token: &str, _message: &str) -> Result<ChatReply, ClientError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let backend = FakeAuth::new("user123", "password123");
        let tokens = MemoryTokenStore::new();
        let mut form = LoginForm::new("user123", "password123");

        form.submit(&backend, &tokens).await.unwrap();

        assert_eq!(tokens.get_token().unwrap().as_deref(), Some("abc"));
        assert!(!form.is_loading());
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_token() {
        let backend = FakeAuth::new("user123", "password123");
        let tokens = MemoryTokenStore::with_token("previous");
        let mut form = LoginForm::new("user123", "nope");

        let err = form.submit(&backend, &tokens).await.unwrap_err();

        assert!(matches!(err, LoginFailure::Rejected(_)));
        assert_eq!(err.alert_text(), LOGIN_FAILED_ALERT);
        assert_eq!(tokens.get_token().unwrap().as_deref(), Some("previous"));
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_empty_fields_still_reach_backend() {
        let backend = FakeAuth::new("user123", "password123");
        let tokens = MemoryTokenStore::new();
        let mut form = LoginForm::default();

        assert!(form.submit(&backend, &tokens).await.is_err());
        assert_eq!(
            backend.seen.lock().unwrap().as_slice(),
            &[(String::new(), String::new())]
        );
        assert_eq!(tokens.get_token().unwrap(), None);
    }

    #[tokio::test]
    async fn test_dropped_login_releases_loading() {
        let tokens = MemoryTokenStore::new();
        let mut form = LoginForm::new("user123", "password123");

        let result =
            tokio::time::timeout(Duration::from_millis(20), form.submit(&HangingAuth, &tokens)).await;

        assert!(result.is_err());
        assert!(!form.is_loading());
    }

    #[test]
    fn test_loading_guard_sets_and_releases() {
        let mut flag = false;
        {
            let guard = LoadingGuard::acquire(&mut flag);
            assert!(*guard.flag);
        }
        assert!(!flag);

        let form = LoginForm {
            loading: true,
            ..LoginForm::default()
        };
        assert_eq!(form.submit_label(), VERIFYING_LABEL);
    }
}

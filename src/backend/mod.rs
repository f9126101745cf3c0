//! Companion Backend
//!
//! The two HTTP endpoints this client consumes, behind a trait so the chat
//! and login flows can run against a fake in tests.
//!
//! ## Endpoints
//!
//! - `POST /api/login`: form-encoded `username`/`password`, answers `{ access_token }`
//! - `POST /api/chat`: JSON `{ message }` with a bearer token, answers `{ reply }`

mod client;

pub use client::{ClientError, CompanionClient, ClientConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can serve the login and chat endpoints
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError>;

    /// Send one user message and wait for the assistant's reply
    async fn chat(&self, token: &str, message: &str) -> Result<ChatReply, ClientError>;
}

/// Username and password, held only until the login form is submitted
#[derive(Clone, Default, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful `/api/login` body
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always "bearer" in practice; accepted and ignored
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Request body for `/api/chat`
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful `/api/chat` body
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatReply {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("user123", "password123");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("user123"));
        assert!(!printed.contains("password123"));
    }

    #[test]
    fn test_login_response_token_type_optional() {
        let with_type: LoginResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert_eq!(with_type.access_token, "abc");
        assert_eq!(with_type.token_type.as_deref(), Some("bearer"));

        let without: LoginResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(without.token_type, None);
    }
}

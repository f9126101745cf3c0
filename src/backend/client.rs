//! Companion REST API Client
//!
//! HTTP client for the companion backend's login and chat endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

use super::{ChatBackend, ChatReply, ChatRequest, Credentials, LoginResponse};

/// Companion REST API client
pub struct CompanionClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the companion client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the backend (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_ms: 60_000,
        }
    }
}

impl CompanionClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl ChatBackend for CompanionClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let url = self.url("/api/login");
        tracing::debug!(username = %credentials.username, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .form(credentials)
            .send()
            .await
            .map_err(classify)?;

        let response = check_status(response).await?;
        response.json().await.map_err(ClientError::Request)
    }

    async fn chat(&self, token: &str, message: &str) -> Result<ChatReply, ClientError> {
        let url = self.url("/api/chat");
        tracing::debug!(chars = message.chars().count(), "POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(classify)?;

        let response = check_status(response).await?;
        response.json().await.map_err(ClientError::Request)
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ClientError::ApiError {
            status: status.as_u16(),
            message: text,
        });
    }
    Ok(response)
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the companion backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend rejected the bearer token")]
    Unauthorized,

    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,
}

impl ClientError {
    /// True when the backend answered 401
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

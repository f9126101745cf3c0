//! HTTP API Client
//!
//! Functions for the companion backend's `/api/login` and `/api/chat`.

use gloo_net::http::{Request, Response};
use std::fmt;
use thiserror::Error;

/// Local storage key that overrides the API origin
pub const API_URL_KEY: &str = "companion_api_url";

/// Get the API base URL: the local storage override if set, otherwise the
/// page's own origin.
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| {
            let stored = window
                .local_storage()
                .ok()
                .flatten()
                .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());

            stored.or_else(|| window.location().origin().ok())
        })
        .unwrap_or_default();

    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Request/Response Types ============

/// Login form fields. Held only until submission.
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Failures of a backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Session token rejected")]
    Unauthorized,

    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Map a non-2xx status to its error
pub fn status_error(status: u16) -> Option<ApiError> {
    match status {
        200..=299 => None,
        401 => Some(ApiError::Unauthorized),
        other => Some(ApiError::Status(other)),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if let Some(error) = status_error(response.status()) {
        return Err(error);
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

// ============ API Functions ============

/// Exchange credentials for a bearer token
pub async fn login(credentials: &Credentials) -> Result<LoginResponse, ApiError> {
    let params = web_sys::UrlSearchParams::new()
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    params.append("username", &credentials.username);
    params.append("password", &credentials.password);

    let response = Request::post(&format!("{}/api/login", get_api_base()))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(wasm_bindgen::JsValue::from(params))
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(response).await
}

/// Send one chat message with the bearer token
pub async fn send_chat(token: &str, message: &str) -> Result<ChatReply, ApiError> {
    let response = Request::post(&format!("{}/api/chat", get_api_base()))
        .header("Authorization", &format!("Bearer {}", token))
        .json(&ChatRequest { message })
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(status_error(200), None);
        assert_eq!(status_error(204), None);
        assert_eq!(status_error(401), Some(ApiError::Unauthorized));
        assert_eq!(status_error(400), Some(ApiError::Status(400)));
        assert_eq!(status_error(503), Some(ApiError::Status(503)));
    }

    #[test]
    fn test_chat_request_shape() {
        let body = serde_json::to_string(&ChatRequest { message: "hello" }).unwrap();
        assert_eq!(body, r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_login_response_ignores_token_type() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert_eq!(parsed.access_token, "abc");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            username: "user123".to_string(),
            password: "password123".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("password123"));
    }
}

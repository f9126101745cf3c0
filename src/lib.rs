//! # Companion
//!
//! Client for a companion chat backend: log in once, then hold a
//! conversation whose replies come from `/api/chat`.
//!
//! ## Modules
//!
//! - [`backend`]: the `/api/login` and `/api/chat` contract and its HTTP client
//! - [`session`]: transcript, chat state machine and token storage
//! - [`login`]: the login form flow
//! - [`render`]: terminal bubble layout
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use companion::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompanionClient::new(ClientConfig::default())?;
//!     let tokens = MemoryTokenStore::new();
//!
//!     LoginForm::new("user123", "password123").submit(&client, &tokens).await?;
//!
//!     let mut chat = ChatSession::new();
//!     chat.set_input("hello");
//!     if let SendOutcome::Failed(failure) = chat.send_message(&client, &tokens).await {
//!         eprintln!("{}", failure.alert_text());
//!     }
//!
//!     for message in chat.transcript() {
//!         println!("{}", render_bubble(message, 80));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod login;
pub mod render;
pub mod session;

pub use backend::{
    ChatBackend, ChatReply, ClientConfig, ClientError, CompanionClient, Credentials, LoginResponse,
};

pub use session::{
    ChatFailure, ChatSession, FileTokenStore, MemoryTokenStore, Message, Role, SendOutcome,
    SendPhase, Skipped, TokenStore, TokenStoreError, Transcript, TOKEN_KEY,
};

pub use login::{LoginFailure, LoginForm, LOGIN_FAILED_ALERT, SUBMIT_LABEL, VERIFYING_LABEL};

pub use render::{render_bubble, Alignment, DEFAULT_WIDTH, THINKING_INDICATOR};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

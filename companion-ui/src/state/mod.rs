//! State Management
//!
//! Chat session state, the login completion step and the token store.

pub mod login;
pub mod session;
pub mod token;

pub use login::{complete_login, LoginStep, CHAT_ROUTE, SUBMIT_LABEL, VERIFYING_LABEL};
pub use session::{is_send_key, ChatSession, Message, Role, THINKING_LABEL};
pub use token::{provide_token_store, use_token_store, LocalStorageTokens, TokenHandle, TokenStore};

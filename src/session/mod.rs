//! Chat Session State
//!
//! Everything the chat view holds in memory, plus the store the bearer
//! token is read from.
//!
//! - **Transcript**: append-only list of user/assistant messages
//! - **ChatSession**: input line, transcript and the Idle/Sending state machine
//! - **TokenStore**: injected home of the session token

mod chat;
mod token;
mod transcript;

pub use chat::{ChatFailure, ChatSession, SendOutcome, SendPhase, Skipped};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError, TOKEN_KEY};
pub use transcript::{Message, Role, Transcript};

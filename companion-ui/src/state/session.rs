//! Chat Session State
//!
//! The chat view's transcript, input line and in-flight flag. Pages keep
//! a `ChatSession` in an `RwSignal` and drive it with
//! [`ChatSession::begin_send`] / [`ChatSession::finish_send`] around the
//! network call.

use thiserror::Error;

use crate::api::{ApiError, ChatReply};

/// Shown while a reply is pending
pub const THINKING_LABEL: &str = "Your companion is thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A chat message; immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPhase {
    #[default]
    Idle,
    Sending,
}

/// What the user is told when a send fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatFailure {
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Connection interrupted, please try again later")]
    ConnectionInterrupted,
}

impl From<&ApiError> for ChatFailure {
    fn from(error: &ApiError) -> Self {
        match error {
            ApiError::Unauthorized => ChatFailure::SessionExpired,
            _ => ChatFailure::ConnectionInterrupted,
        }
    }
}

/// Whether a keydown in the input bar sends, like pressing the send button.
/// Enter while an IME composition is open confirms the composition instead.
pub fn is_send_key(key: &str, composing: bool) -> bool {
    key == "Enter" && !composing
}

#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<Message>,
    input: String,
    phase: SendPhase,
}

impl ChatSession {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SendPhase::Sending
    }

    /// Append the input as a user message and enter `Sending`.
    ///
    /// Returns the text to send, or `None` when the input is blank or a
    /// reply is still pending. Nothing changes in that case.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.input.trim().is_empty() || self.phase == SendPhase::Sending {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.transcript.push(Message::user(text.clone()));
        self.phase = SendPhase::Sending;
        Some(text)
    }

    /// Leave `Sending`, appending the reply on success
    pub fn finish_send(&mut self, result: Result<ChatReply, ApiError>) -> Result<(), ChatFailure> {
        self.phase = SendPhase::Idle;
        match result {
            Ok(reply) => {
                self.transcript.push(Message::assistant(reply.reply));
                Ok(())
            }
            Err(e) => Err(ChatFailure::from(&e)),
        }
    }
}

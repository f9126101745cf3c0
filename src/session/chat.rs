//! Chat Session
//!
//! Client-side state machine for one chat view: the input line, the
//! transcript, and whether a request is in flight.
//!
//! ## Send cycle
//!
//! ```text
//! Idle --send_message--> Sending --reply--> Idle (user + assistant appended)
//!                                 \-error--> Idle (user appended, failure reported)
//! ```
//!
//! A send is refused while another one is in flight, and blank input is
//! ignored without touching the transcript or the network.

use thiserror::Error;

use super::token::TokenStore;
use super::transcript::{Message, Transcript};
use crate::backend::{ChatBackend, ChatReply, ClientError};

/// Whether a chat request is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPhase {
    #[default]
    Idle,
    Sending,
}

/// Why a send did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skipped {
    /// Input was empty after trimming
    EmptyInput,
    /// A previous send has not resolved yet
    InFlight,
}

/// User-facing failure of a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatFailure {
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Connection interrupted, please try again later")]
    ConnectionInterrupted,
}

impl ChatFailure {
    /// Text shown to the user when this failure is alerted
    pub fn alert_text(&self) -> String {
        self.to_string()
    }
}

impl From<&ClientError> for ChatFailure {
    fn from(error: &ClientError) -> Self {
        if error.is_unauthorized() {
            ChatFailure::SessionExpired
        } else {
            ChatFailure::ConnectionInterrupted
        }
    }
}

/// Result of one `send_message` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent
    Skipped(Skipped),
    /// Assistant reply appended
    Replied,
    /// Only the user's message was appended
    Failed(ChatFailure),
}

/// In-memory state of the chat view
#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Transcript,
    input: String,
    phase: SendPhase,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    /// Drives the "thinking" indicator
    pub fn is_loading(&self) -> bool {
        self.phase == SendPhase::Sending
    }

    /// Start a send cycle.
    ///
    /// On success the raw input is appended as a user message, the input is
    /// cleared, the session enters `Sending` and the text to send is
    /// returned. The caller must follow up with [`ChatSession::finish_send`].
    pub fn begin_send(&mut self) -> Result<String, Skipped> {
        if self.input.trim().is_empty() {
            return Err(Skipped::EmptyInput);
        }
        if self.phase == SendPhase::Sending {
            return Err(Skipped::InFlight);
        }

        let text = std::mem::take(&mut self.input);
        self.transcript.push(Message::user(text.clone()));
        self.phase = SendPhase::Sending;
        Ok(text)
    }

    /// Resolve the cycle started by [`ChatSession::begin_send`]
    pub fn finish_send(&mut self, result: Result<ChatReply, ClientError>) -> Result<(), ChatFailure> {
        self.phase = SendPhase::Idle;
        self.apply_reply(result)
    }

    fn apply_reply(&mut self, result: Result<ChatReply, ClientError>) -> Result<(), ChatFailure> {
        match result {
            Ok(reply) => {
                self.transcript.push(Message::assistant(reply.reply));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                Err(ChatFailure::from(&e))
            }
        }
    }

    /// Send the current input to the backend and record the reply.
    ///
    /// The token is read from `tokens` right before the request. A missing
    /// token is sent as an empty bearer and surfaces as a 401. If the
    /// returned future is dropped mid-request the session still returns to
    /// `Idle`.
    pub async fn send_message<B, T>(&mut self, backend: &B, tokens: &T) -> SendOutcome
    where
        B: ChatBackend + ?Sized,
        T: TokenStore + ?Sized,
    {
        let text = match self.begin_send() {
            Ok(text) => text,
            Err(skipped) => return SendOutcome::Skipped(skipped),
        };

        let mut guard = SendingGuard { session: self };

        let token = match tokens.get_token() {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session token");
                String::new()
            }
        };

        let result = backend.chat(&token, &text).await;
        let outcome = match guard.session.apply_reply(result) {
            Ok(()) => SendOutcome::Replied,
            Err(failure) => SendOutcome::Failed(failure),
        };

        drop(guard);
        outcome
    }
}

/// Returns the session to `Idle` however the send cycle ends
struct SendingGuard<'a> {
    session: &'a mut ChatSession,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.session.phase = SendPhase::Idle;
    }
}

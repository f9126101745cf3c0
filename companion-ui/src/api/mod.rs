//! Backend API
//!
//! HTTP calls to the companion backend.

pub mod client;

pub use client::{login, send_chat, ApiError, ChatReply, Credentials, LoginResponse};

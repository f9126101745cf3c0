//! UI Components
//!
//! Reusable Leptos components for the chat view.

pub mod bubble;
pub mod loading;

pub use bubble::MessageBubble;
pub use loading::ThinkingIndicator;

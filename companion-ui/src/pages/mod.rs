//! Pages
//!
//! Top-level page components for each route.

pub mod chat;
pub mod login;

pub use chat::Chat;
pub use login::Login;

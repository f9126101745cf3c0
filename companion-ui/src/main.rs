//! Companion Web Client
//!
//! Single-page companion chat built with Leptos (WASM).
//!
//! # Views
//!
//! - `/` and `/login`: exchange a username and password for a bearer token
//! - `/chat`: talk to the companion, one request per message
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the backend's `/api/login` and `/api/chat`
//! endpoints over HTTP and keeps the bearer token in local storage.

use leptos::*;

mod alert;
mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}

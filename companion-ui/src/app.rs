//! App Root Component
//!
//! Routing and the token store provider.

use leptos::*;
use leptos_router::*;

use crate::pages::{Chat, Login};
use crate::state::{provide_token_store, LocalStorageTokens, TokenHandle, CHAT_ROUTE};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_token_store(TokenHandle::new(LocalStorageTokens));

    view! {
        <Router>
            <Routes>
                <Route path="/" view=Login />
                <Route path="/login" view=Login />
                <Route path=CHAT_ROUTE view=Chat />
                <Route path="/*any" view=NotFound />
            </Routes>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <div class="login-card">
                <h2>"Page not found"</h2>
                <A href="/login" class="primary-button">"Back to login"</A>
            </div>
        </div>
    }
}

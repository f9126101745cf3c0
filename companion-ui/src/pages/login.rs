//! Login Page
//!
//! Exchanges a username and password for a bearer token, then moves on to
//! the chat. Fields are sent as typed; the backend does all validation.

use leptos::*;
use leptos_router::use_navigate;

use crate::alert::{alert, console_error};
use crate::api::{self, Credentials};
use crate::state::{complete_login, use_token_store, LoginStep, SUBMIT_LABEL, VERIFYING_LABEL};

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let tokens = use_token_store();
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);

        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let tokens = tokens.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            let result = api::login(&credentials).await;
            if let Err(e) = &result {
                console_error(&format!("Login failed: {}", e));
            }

            let step = LoginStep::from(complete_login(&*tokens, result));
            set_loading.set(false);

            match step {
                LoginStep::Navigate(route) => navigate(route, Default::default()),
                LoginStep::Alert(text) => alert(&text),
            }
        });
    };

    view! {
        <div class="page">
            <div class="login-card">
                <h2>"Welcome back"</h2>

                <form class="login-form" on:submit=on_submit>
                    <input
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button
                        type="submit"
                        class="primary-button"
                        disabled=move || loading.get()
                    >
                        {move || if loading.get() { VERIFYING_LABEL } else { SUBMIT_LABEL }}
                    </button>
                </form>
            </div>
        </div>
    }
}

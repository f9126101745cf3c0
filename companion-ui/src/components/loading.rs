//! Loading Component

use leptos::*;

use crate::state::THINKING_LABEL;

/// Transient indicator shown on the reply side while a request is pending
#[component]
pub fn ThinkingIndicator(#[prop(into)] visible: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="bubble-row left">
                <div class="thinking">{THINKING_LABEL}</div>
            </div>
        </Show>
    }
}

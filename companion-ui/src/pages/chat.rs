//! Chat Page
//!
//! Transcript, thinking indicator and the input bar. The transcript lives
//! only in this component; leaving the page drops it.

use leptos::*;

use crate::alert::{alert, console_error};
use crate::api;
use crate::components::{MessageBubble, ThinkingIndicator};
use crate::state::{is_send_key, use_token_store, ChatSession, TokenStore};

/// Chat page component
#[component]
pub fn Chat() -> impl IntoView {
    let tokens = use_token_store();
    let session = create_rw_signal(ChatSession::default());

    let loading = Signal::derive(move || session.with(|s| s.is_loading()));
    let transcript_len = create_memo(move |_| session.with(|s| s.transcript().len()));
    let scroll_anchor = create_node_ref::<html::Div>();

    // Keep the newest message in view
    create_effect(move |_| {
        transcript_len.get();
        if let Some(anchor) = scroll_anchor.get() {
            anchor.scroll_into_view();
        }
    });

    let send = Callback::new(move |()| {
        let Some(text) = session.try_update(|s| s.begin_send()).flatten() else {
            return;
        };
        let token = tokens.get_token().unwrap_or_default();

        spawn_local(async move {
            let result = api::send_chat(&token, &text).await;
            if let Err(e) = &result {
                console_error(&format!("Chat request failed: {}", e));
            }

            if let Some(Err(failure)) = session.try_update(|s| s.finish_send(result)) {
                alert(&failure.to_string());
            }
        });
    });

    view! {
        <div class="page">
            <div class="chat-window">
                <div class="chat-header">
                    <h2>"✨ Your companion · always here"</h2>
                </div>

                <div class="transcript">
                    <For
                        each=move || {
                            session.with(|s| {
                                s.transcript().iter().cloned().enumerate().collect::<Vec<_>>()
                            })
                        }
                        key=|(index, _)| *index
                        children=|(_, message)| view! { <MessageBubble message=message /> }
                    />

                    <ThinkingIndicator visible=loading />

                    <div node_ref=scroll_anchor />
                </div>

                <div class="input-bar">
                    <input
                        placeholder="Tell me anything..."
                        prop:value=move || session.with(|s| s.input().to_string())
                        on:input=move |ev| session.update(|s| s.set_input(event_target_value(&ev)))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if is_send_key(&ev.key(), ev.is_composing()) {
                                send.call(());
                            }
                        }
                    />
                    <button class="primary-button" on:click=move |_| send.call(())>
                        "Send"
                    </button>
                </div>
            </div>
        </div>
    }
}

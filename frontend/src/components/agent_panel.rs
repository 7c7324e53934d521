use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use zurt_agent::input::{KeyAction, key_action};
use zurt_agent::models::{Message, MessageRole};

use crate::api::GlooAssistantService;
use crate::state::{AgentState, active_locale};

/// Floating assistant panel. The conversation lives as long as this
/// component is mounted; collapsing only swaps the view for a toggle button.
#[component]
pub fn AgentPanel(collapsed: ReadSignal<bool>, #[prop(into)] on_toggle: Callback<()>) -> impl IntoView {
    let state = AgentState::provide(GlooAssistantService::new(), &active_locale());

    // Fetch insights the first time the panel is opened
    Effect::new(move |_| {
        if !collapsed.get() {
            state.bootstrap();
        }
    });

    view! {
        {move || {
            if collapsed.get() {
                view! {
                    <button
                        class="agent-toggle"
                        aria-label="Open ZURT Agent"
                        on:click=move |_| on_toggle.run(())
                    >
                        "✦"
                    </button>
                }
                .into_any()
            } else {
                view! {
                    <aside class="agent-panel">
                        <PanelHeader on_close=on_toggle />
                        <Transcript />
                        <PanelInput />
                        <p class="agent-disclaimer">
                            "ZURT Agent can make mistakes. Verify important info."
                        </p>
                    </aside>
                }
                .into_any()
            }
        }}
    }
}

#[component]
fn PanelHeader(on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="agent-header">
            <span class="agent-title">"ZURT Agent"</span>
            <span class="agent-online-dot"></span>
            <button
                class="agent-close"
                aria-label="Close agent panel"
                on:click=move |_| on_close.run(())
            >
                "×"
            </button>
        </div>
    }
}

/// Message history with empty-state hint and thinking indicator.
#[component]
fn Transcript() -> impl IntoView {
    let state = expect_context::<AgentState>();
    let conversation = state.conversation;
    let transcript = state.transcript();
    let scroll_ref = NodeRef::<html::Div>::new();

    let message_count = Memo::new(move |_| transcript.with(Vec::len));
    let pending = Memo::new(move |_| conversation.with(|c| c.is_pending()));

    // Snap to the newest message whenever the transcript grows
    Effect::new(move |_| {
        message_count.track();
        if let Some(el) = scroll_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div class="agent-messages" node_ref=scroll_ref>
            <Show when=move || message_count.get() == 0 && !pending.get()>
                <div class="agent-empty">
                    "Ask me about your finances, investments, or goals."
                </div>
            </Show>
            <For
                each=move || transcript.get()
                key=|m| m.id.clone()
                let:msg
            >
                <MessageBubble message=msg />
            </For>
            <Show when=move || pending.get()>
                <div class="agent-thinking">"Thinking..."</div>
            </Show>
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let css_class = match message.role {
        MessageRole::User => "agent-msg user",
        MessageRole::Assistant => "agent-msg assistant",
    };

    view! { <div class=css_class>{message.content}</div> }
}

/// Textarea bound to the conversation draft, plus the send button.
#[component]
fn PanelInput() -> impl IntoView {
    let state = expect_context::<AgentState>();
    let conversation = state.conversation;

    let key_state = state.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        // Shift+Enter falls through to the textarea's own newline
        if key_action(&ev.key(), ev.shift_key()) == KeyAction::Submit {
            ev.prevent_default();
            key_state.send();
        }
    };

    let on_submit = move |_| {
        state.send();
    };

    view! {
        <div class="agent-input">
            <textarea
                rows="1"
                placeholder="Ask ZURT Agent..."
                prop:value=move || conversation.with(|c| c.draft().to_string())
                on:input=move |ev| {
                    conversation.update(|c| c.set_draft(event_target_value(&ev)));
                }
                on:keydown=on_keydown
            />
            <button
                class="agent-send"
                aria-label="Send message"
                on:click=on_submit
                disabled=move || !conversation.with(|c| c.can_submit())
            >
                "Send"
            </button>
        </div>
    }
}

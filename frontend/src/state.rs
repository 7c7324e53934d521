use leptos::prelude::*;
use leptos::task::spawn_local;

use zurt_agent::agent::AssistantService;
use zurt_agent::models::Message;
use zurt_agent::service::conversation::Conversation;

use crate::api::GlooAssistantService;

const FALLBACK_LOCALE: &str = "en-US";

/// Locale tag reported by the browser.
pub fn active_locale() -> String {
    web_sys::window()
        .and_then(|w| w.navigator().language())
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}

/// Agent panel state, provided via Leptos context for the lifetime of one
/// panel mount. Dropping the owner discards the conversation.
#[derive(Clone)]
pub struct AgentState {
    pub conversation: RwSignal<Conversation>,
    agent: GlooAssistantService,
}

impl AgentState {
    /// Create a new `AgentState` and provide it in the current Leptos context.
    pub fn provide(agent: GlooAssistantService, locale: &str) -> Self {
        let state = Self {
            conversation: RwSignal::new(Conversation::new(locale)),
            agent,
        };
        provide_context(state.clone());
        state
    }

    /// Messages in insertion order. Recomputed only when the transcript
    /// grows, so draft edits don't clone the history.
    pub fn transcript(&self) -> Memo<Vec<Message>> {
        let conversation = self.conversation;
        let message_count = Memo::new(move |_| conversation.with(|c| c.messages().len()));
        Memo::new(move |_| {
            message_count.track();
            conversation.with_untracked(|c| c.messages().to_vec())
        })
    }

    /// Fetch the insight message, once per mount.
    pub fn bootstrap(&self) {
        let locale = active_locale();
        let mut request = None;
        self.conversation.update(|c| {
            c.set_locale(&locale);
            request = c.begin_bootstrap();
        });
        let Some(request) = request else {
            return;
        };

        let agent = self.agent.clone();
        let conversation = self.conversation;
        spawn_local(async move {
            let outcome = agent.insights(&request).await;
            if conversation.try_update(|c| c.complete_bootstrap(outcome)).is_none() {
                log::debug!("Panel unmounted before insights arrived");
            }
        });
    }

    /// Send the current draft as one turn. No-op while a turn is in flight.
    pub fn send(&self) {
        // The browser locale can change mid-session; each request follows it
        let locale = active_locale();
        let mut request = None;
        self.conversation.update(|c| {
            c.set_locale(&locale);
            request = c.submit();
        });
        let Some(request) = request else {
            return;
        };

        let agent = self.agent.clone();
        let conversation = self.conversation;
        spawn_local(async move {
            let outcome = agent.chat(&request).await;
            if conversation.try_update(|c| c.complete_turn(outcome)).is_none() {
                log::debug!("Panel unmounted before the reply arrived");
            }
        });
    }
}

use tracing::{debug, info, warn};

use crate::errors::AgentError;
use crate::locale::Language;
use crate::models::{ChatRequest, ChatResponse, InsightRequest, InsightResponse, Message, MessageRole};

/// Assistant text shown when a chat turn fails.
pub const APOLOGY_TEXT: &str = "Sorry, I could not process your request. Please try again.";

/// Assistant text used when a successful reply carries no usable content.
pub const PLACEHOLDER_TEXT: &str = "...";

fn message_field(resp: &ChatResponse) -> Option<&str> {
    resp.message.as_deref()
}

fn response_field(resp: &ChatResponse) -> Option<&str> {
    resp.response.as_deref()
}

/// Candidate reply fields, tried in order.
const REPLY_EXTRACTORS: [fn(&ChatResponse) -> Option<&str>; 2] = [message_field, response_field];

/// Picks the assistant text for a chat reply: `message`, then `response`,
/// then [`PLACEHOLDER_TEXT`]. Empty strings count as absent.
pub fn reply_text(resp: &ChatResponse) -> &str {
    REPLY_EXTRACTORS
        .iter()
        .find_map(|extract| extract(resp).filter(|text| !text.is_empty()))
        .unwrap_or(PLACEHOLDER_TEXT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    NotStarted,
    Loading,
    Loaded,
}

/// Transcript, draft and turn bookkeeping for one panel mount.
///
/// Every network interaction is split into a `begin_*` step that validates
/// the current state and hands back the request to issue, and a
/// `complete_*` step that applies the outcome. Shells run the request in
/// between on whatever executor they have.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    draft: String,
    conversation_id: Option<String>,
    turn: TurnState,
    bootstrap: BootstrapState,
    language: Language,
    next_seq: u64,
}

impl Conversation {
    pub fn new(locale: &str) -> Self {
        Self {
            messages: Vec::new(),
            draft: String::new(),
            conversation_id: None,
            turn: TurnState::Idle,
            bootstrap: BootstrapState::NotStarted,
            language: Language::from_locale(locale),
            next_seq: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    pub fn is_pending(&self) -> bool {
        self.turn == TurnState::AwaitingResponse
    }

    pub fn bootstrap_state(&self) -> BootstrapState {
        self.bootstrap
    }

    pub fn is_bootstrap_loaded(&self) -> bool {
        self.bootstrap == BootstrapState::Loaded
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Follows a locale switch; affects requests issued afterwards.
    pub fn set_locale(&mut self, locale: &str) {
        self.language = Language::from_locale(locale);
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether [`Conversation::submit`] would issue a request right now.
    pub fn can_submit(&self) -> bool {
        self.turn == TurnState::Idle && !self.draft.trim().is_empty()
    }

    // ── Bootstrap ─────────────────────────────────────────────────────────────

    /// Starts the one-time insight fetch. Returns `None` once it has been
    /// started, so repeated expands never issue a second request.
    pub fn begin_bootstrap(&mut self) -> Option<InsightRequest> {
        if self.bootstrap != BootstrapState::NotStarted {
            return None;
        }
        self.bootstrap = BootstrapState::Loading;
        Some(InsightRequest { language: self.language })
    }

    /// Applies the insight outcome. Failures are only logged.
    pub fn complete_bootstrap(&mut self, outcome: Result<InsightResponse, AgentError>) {
        match outcome {
            Ok(InsightResponse { message: Some(text) }) if !text.is_empty() => {
                self.push(MessageRole::Assistant, "insight", text);
            }
            Ok(_) => debug!("Insight response carried no message"),
            Err(e) => warn!("Failed to load insights: {e}"),
        }
        self.bootstrap = BootstrapState::Loaded;
    }

    // ── Turns ─────────────────────────────────────────────────────────────────

    /// Starts a turn from the current draft.
    ///
    /// Returns `None` without touching any state when the trimmed draft is
    /// empty or a turn is already awaiting its response.
    pub fn submit(&mut self) -> Option<ChatRequest> {
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        if self.turn == TurnState::AwaitingResponse {
            debug!("Ignoring submit while a turn is in flight");
            return None;
        }
        let text = text.to_string();

        self.push(MessageRole::User, "user", text.clone());
        self.draft.clear();
        self.turn = TurnState::AwaitingResponse;

        Some(ChatRequest {
            message: text,
            conversation_id: self.conversation_id.clone(),
            language: self.language,
        })
    }

    /// Applies the outcome of the in-flight turn and returns to idle.
    pub fn complete_turn(&mut self, outcome: Result<ChatResponse, AgentError>) {
        if self.turn != TurnState::AwaitingResponse {
            warn!("Dropping chat outcome with no turn in flight");
            return;
        }

        match outcome {
            Ok(resp) => {
                if self.conversation_id.is_none() {
                    if let Some(id) = resp.conversation_id.as_deref().filter(|id| !id.is_empty()) {
                        info!("Conversation established: {id}");
                        self.conversation_id = Some(id.to_string());
                    }
                } else if resp.conversation_id.is_some()
                    && resp.conversation_id != self.conversation_id
                {
                    warn!("Ignoring conversation id change from the assistant service");
                }
                let text = reply_text(&resp).to_string();
                self.push(MessageRole::Assistant, "bot", text);
            }
            Err(e) => {
                warn!(transient = e.is_transient(), "Chat turn failed: {e}");
                self.push(MessageRole::Assistant, "err", APOLOGY_TEXT.to_string());
            }
        }

        self.turn = TurnState::Idle;
    }

    fn push(&mut self, role: MessageRole, kind: &str, content: String) {
        let id = format!("{kind}-{}", self.next_seq);
        self.next_seq += 1;
        self.messages.push(Message::new(id, role, content));
    }
}

use tracing::debug;

use crate::agent::AssistantService;
use crate::service::conversation::Conversation;

/// Drives a [`Conversation`] against an [`AssistantService`] for shells that
/// can await requests inline, such as the terminal panel.
pub struct ConversationController<A> {
    agent: A,
    conversation: Conversation,
    expanded: bool,
}

impl<A: AssistantService> ConversationController<A> {
    /// A collapsed panel with an empty transcript.
    pub fn new(agent: A, locale: &str) -> Self {
        Self { agent, conversation: Conversation::new(locale), expanded: false }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Opens the panel, bootstrapping the transcript the first time.
    pub async fn expand(&mut self) {
        self.expanded = true;
        self.bootstrap().await;
    }

    /// Hides the panel. Transcript and identity survive until the controller is dropped.
    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    /// Fetches the insight message if the panel is open and no attempt has
    /// been made yet. Returns whether a request was issued.
    pub async fn bootstrap(&mut self) -> bool {
        if !self.expanded {
            return false;
        }
        let Some(request) = self.conversation.begin_bootstrap() else {
            return false;
        };
        debug!("Loading insights (language {})", request.language);
        let outcome = self.agent.insights(&request).await;
        self.conversation.complete_bootstrap(outcome);
        true
    }

    /// Sends the current draft as one turn. Returns whether a request was issued.
    pub async fn send(&mut self) -> bool {
        let Some(request) = self.conversation.submit() else {
            return false;
        };
        let outcome = self.agent.chat(&request).await;
        self.conversation.complete_turn(outcome);
        true
    }

    /// Replaces the draft with `text` and sends it.
    pub async fn send_text(&mut self, text: &str) -> bool {
        self.conversation.set_draft(text);
        self.send().await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use super::*;
    use crate::errors::AgentError;
    use crate::locale::Language;
    use crate::models::{ChatRequest, ChatResponse, InsightRequest, InsightResponse, MessageRole};
    use crate::service::conversation::{APOLOGY_TEXT, PLACEHOLDER_TEXT};

    #[derive(Default)]
    struct ScriptedAgent {
        insights: RefCell<VecDeque<Result<InsightResponse, AgentError>>>,
        replies: RefCell<VecDeque<Result<ChatResponse, AgentError>>>,
        insight_calls: Cell<usize>,
        chat_requests: RefCell<Vec<ChatRequest>>,
    }

    impl ScriptedAgent {
        fn with_insight(self, outcome: Result<InsightResponse, AgentError>) -> Self {
            self.insights.borrow_mut().push_back(outcome);
            self
        }

        fn with_reply(self, outcome: Result<ChatResponse, AgentError>) -> Self {
            self.replies.borrow_mut().push_back(outcome);
            self
        }
    }

    impl AssistantService for &ScriptedAgent {
        async fn insights(&self, _request: &InsightRequest) -> Result<InsightResponse, AgentError> {
            self.insight_calls.set(self.insight_calls.get() + 1);
            self.insights.borrow_mut().pop_front().unwrap_or(Ok(InsightResponse::default()))
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            self.chat_requests.borrow_mut().push(request.clone());
            self.replies.borrow_mut().pop_front().unwrap_or(Ok(ChatResponse::default()))
        }
    }

    fn reply(id: Option<&str>, message: &str) -> Result<ChatResponse, AgentError> {
        Ok(ChatResponse {
            conversation_id: id.map(str::to_string),
            message: Some(message.to_string()),
            response: None,
        })
    }

    #[tokio::test]
    async fn balance_scenario() {
        let agent = ScriptedAgent::default().with_reply(reply(Some("abc"), "Your balance is R$100."));
        let mut ctl = ConversationController::new(&agent, "pt-BR");

        assert!(ctl.send_text("What is my balance?").await);

        let conv = ctl.conversation();
        let transcript: Vec<_> = conv.messages().iter().map(|m| (m.role, m.content.as_str())).collect();
        assert_eq!(
            transcript,
            vec![
                (MessageRole::User, "What is my balance?"),
                (MessageRole::Assistant, "Your balance is R$100."),
            ]
        );
        assert_eq!(conv.conversation_id(), Some("abc"));
        assert!(!conv.is_pending());

        let sent = agent.chat_requests.borrow();
        assert_eq!(sent[0].message, "What is my balance?");
        assert_eq!(sent[0].language.as_str(), "pt");
    }

    #[tokio::test]
    async fn network_failure_yields_apology() {
        let agent = ScriptedAgent::default().with_reply(Err(AgentError::network("connection reset")));
        let mut ctl = ConversationController::new(&agent, "en-US");

        ctl.send_text("What is my balance?").await;

        let conv = ctl.conversation();
        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.messages()[1].content, APOLOGY_TEXT);
        assert_eq!(conv.conversation_id(), None);
        assert!(!conv.is_pending());
    }

    #[tokio::test]
    async fn blank_input_issues_no_request() {
        let agent = ScriptedAgent::default();
        let mut ctl = ConversationController::new(&agent, "en-US");

        assert!(!ctl.send_text("   ").await);
        assert!(ctl.conversation().messages().is_empty());
        assert!(agent.chat_requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn identity_is_echoed_on_later_turns() {
        let agent = ScriptedAgent::default()
            .with_reply(reply(Some("abc"), "one"))
            .with_reply(reply(Some("other"), "two"))
            .with_reply(Ok(ChatResponse::default()));
        let mut ctl = ConversationController::new(&agent, "en-US");

        ctl.send_text("a").await;
        ctl.send_text("b").await;
        ctl.send_text("c").await;

        let ids: Vec<_> = agent.chat_requests.borrow().iter().map(|r| r.conversation_id.clone()).collect();
        assert_eq!(ids, vec![None, Some("abc".to_string()), Some("abc".to_string())]);
        assert_eq!(ctl.conversation().conversation_id(), Some("abc"));
        assert_eq!(ctl.conversation().messages()[5].content, PLACEHOLDER_TEXT);
    }

    #[tokio::test]
    async fn bootstrap_runs_once_across_expand_cycles() {
        let agent = ScriptedAgent::default().with_insight(Ok(InsightResponse { message: Some("Welcome back".into()) }));
        let mut ctl = ConversationController::new(&agent, "en-US");

        assert!(!ctl.bootstrap().await);
        assert_eq!(agent.insight_calls.get(), 0);

        ctl.expand().await;
        ctl.collapse();
        ctl.expand().await;
        ctl.collapse();
        ctl.expand().await;

        assert_eq!(agent.insight_calls.get(), 1);
        assert_eq!(ctl.conversation().messages().len(), 1);
        assert_eq!(ctl.conversation().messages()[0].content, "Welcome back");
        assert!(ctl.conversation().is_bootstrap_loaded());
    }

    #[tokio::test]
    async fn failed_bootstrap_is_not_retried() {
        let agent = ScriptedAgent::default().with_insight(Err(AgentError::from_status(500)));
        let mut ctl = ConversationController::new(&agent, "en-US");

        ctl.expand().await;
        ctl.collapse();
        ctl.expand().await;

        assert_eq!(agent.insight_calls.get(), 1);
        assert!(ctl.conversation().messages().is_empty());
        assert!(ctl.conversation().is_bootstrap_loaded());
    }

    #[tokio::test]
    async fn locale_switch_between_turns_changes_language() {
        let agent = ScriptedAgent::default()
            .with_reply(reply(Some("abc"), "hi"))
            .with_reply(reply(Some("abc"), "oi"));
        let mut ctl = ConversationController::new(&agent, "en-US");

        ctl.send_text("hello").await;
        ctl.conversation_mut().set_locale("pt-BR");
        assert_eq!(ctl.conversation().language(), Language::Pt);
        ctl.send_text("olá").await;

        let languages: Vec<_> = agent.chat_requests.borrow().iter().map(|r| r.language).collect();
        assert_eq!(languages, vec![Language::En, Language::Pt]);
    }

    #[tokio::test]
    async fn collapse_keeps_transcript() {
        let agent = ScriptedAgent::default().with_reply(reply(Some("abc"), "hi"));
        let mut ctl = ConversationController::new(&agent, "en-US");

        ctl.expand().await;
        ctl.send_text("hello").await;
        ctl.collapse();
        assert!(!ctl.is_expanded());
        assert_eq!(ctl.conversation().messages().len(), 2);
        assert_eq!(ctl.conversation().conversation_id(), Some("abc"));
    }
}

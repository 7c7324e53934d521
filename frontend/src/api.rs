use futures_util::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;

use zurt_agent::agent::{AssistantService, CHAT_PATH, INSIGHTS_PATH, decode_body};
use zurt_agent::errors::AgentError;
use zurt_agent::models::{ChatRequest, ChatResponse, InsightRequest, InsightResponse};

use crate::session;

/// Base URL of the backend API, overridable at build time with `ZURT_API_BASE`.
const API_BASE: &str = match option_env!("ZURT_API_BASE") {
    Some(base) => base,
    None => "/api",
};

/// Requests still unanswered after this long count as failed.
const REQUEST_TIMEOUT_MS: u32 = 60_000;

/// [`AssistantService`] over the browser's fetch API.
#[derive(Clone)]
pub struct GlooAssistantService {
    base_url: String,
    timeout_ms: u32,
}

impl GlooAssistantService {
    pub fn new() -> Self {
        Self {
            base_url: API_BASE.trim_end_matches('/').to_string(),
            timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AgentError>
    where
        B: Serialize,
        T: DeserializeOwned + Default,
    {
        let request = async {
            let mut builder = Request::post(&format!("{}{path}", self.base_url));
            if let Some(token) = session::auth_token() {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }

            let resp = builder
                .json(body)
                .map_err(|e| AgentError::Encode { message: e.to_string() })?
                .send()
                .await
                .map_err(|e| AgentError::network(e.to_string()))?;

            if !resp.ok() {
                let err = AgentError::from_status(resp.status());
                if err.is_unauthorized() {
                    session::emit_unauthorized("Session expired");
                }
                return Err(err);
            }

            let text = resp.text().await.map_err(|e| AgentError::network(e.to_string()))?;
            decode_body(&text)
        };

        match select(Box::pin(request), Box::pin(TimeoutFuture::new(self.timeout_ms))).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(_) => Err(AgentError::Timeout { after_ms: u64::from(self.timeout_ms) }),
        }
    }
}

impl Default for GlooAssistantService {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantService for GlooAssistantService {
    async fn insights(&self, request: &InsightRequest) -> Result<InsightResponse, AgentError> {
        self.post_json(INSIGHTS_PATH, request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        self.post_json(CHAT_PATH, request).await
    }
}

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{AssistantService, CHAT_PATH, INSIGHTS_PATH, decode_body};
use crate::config::AgentConfig;
use crate::errors::AgentError;
use crate::models::{ChatRequest, ChatResponse, InsightRequest, InsightResponse};

/// [`AssistantService`] over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpAssistantService {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    request_timeout: Duration,
}

impl HttpAssistantService {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AgentError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            auth_token: config.auth_token.clone(),
            request_timeout: config.request_timeout,
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AgentError>
    where
        B: Serialize,
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AgentError::from_status(status.as_u16()));
        }

        let text = resp.text().await.map_err(|e| self.transport_error(e))?;
        decode_body(&text)
    }

    fn transport_error(&self, e: reqwest::Error) -> AgentError {
        if e.is_timeout() {
            AgentError::Timeout {
                after_ms: u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            AgentError::network(e.to_string())
        }
    }
}

impl AssistantService for HttpAssistantService {
    async fn insights(&self, request: &InsightRequest) -> Result<InsightResponse, AgentError> {
        self.post_json(INSIGHTS_PATH, request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        self.post_json(CHAT_PATH, request).await
    }
}

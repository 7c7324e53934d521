//! The remote assistant service the panel talks to.

#[cfg(not(target_arch = "wasm32"))]
pub mod http;

use crate::errors::AgentError;
use crate::models::{ChatRequest, ChatResponse, InsightRequest, InsightResponse};

pub const INSIGHTS_PATH: &str = "/ai/insights";
pub const CHAT_PATH: &str = "/ai/chat";

/// Client side of the assistant backend.
///
/// Implementations exist for native (`reqwest`) and for the browser
/// (`gloo-net`, in the frontend crate). Futures are not required to be
/// `Send`, since the browser client runs on a single-threaded executor.
#[allow(async_fn_in_trait)]
pub trait AssistantService {
    /// `POST /ai/insights`: the proactive message shown when the panel opens.
    async fn insights(&self, request: &InsightRequest) -> Result<InsightResponse, AgentError>;

    /// `POST /ai/chat`: one conversational turn.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError>;
}

/// Decodes a 2xx body. A JSON `null` body counts as a body with every
/// field absent.
pub fn decode_body<T>(text: &str) -> Result<T, AgentError>
where
    T: serde::de::DeserializeOwned + Default,
{
    serde_json::from_str::<Option<T>>(text)
        .map(Option::unwrap_or_default)
        .map_err(|e| AgentError::malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_body_treats_null_as_empty() {
        let resp: ChatResponse = decode_body("null").unwrap();
        assert_eq!(resp, ChatResponse::default());
    }

    #[test]
    fn decode_body_rejects_garbage() {
        let err = decode_body::<ChatResponse>("<html>oops</html>").unwrap_err();
        assert!(matches!(err, AgentError::MalformedBody { .. }));

        let err = decode_body::<InsightResponse>("").unwrap_err();
        assert!(matches!(err, AgentError::MalformedBody { .. }));
    }

    #[test]
    fn decode_body_rejects_wrongly_typed_fields() {
        let err = decode_body::<ChatResponse>(r#"{"message": {"text": "hi"}}"#).unwrap_err();
        assert!(matches!(err, AgentError::MalformedBody { .. }));
    }
}

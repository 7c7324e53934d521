use thiserror::Error;

/// Errors raised while talking to the remote assistant service or loading
/// configuration. The conversation controller absorbs every variant; none of
/// them is fatal to a panel.
#[derive(Debug, Error)]
pub enum AgentError {
    // ── Transport ────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("Server error: {status}")]
    Status { status: u16 },

    #[error("Session is no longer authorized")]
    Unauthorized,

    // ── Payloads ─────────────────────────────────────────────────────────────
    #[error("Serialize error: {message}")]
    Encode { message: String },

    #[error("Parse error: {message}")]
    MalformedBody { message: String },

    // ── Setup ────────────────────────────────────────────────────────────────
    #[error("Invalid value for '{key}': {message}")]
    Config { key: String, message: String },

    #[error("HTTP client could not be built: {0}")]
    ClientBuild(String),
}

impl AgentError {
    pub fn network(message: impl Into<String>) -> Self {
        AgentError::Network { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AgentError::MalformedBody { message: message.into() }
    }

    /// Maps a non-2xx HTTP status onto the matching variant.
    pub fn from_status(status: u16) -> Self {
        if status == 401 {
            AgentError::Unauthorized
        } else {
            AgentError::Status { status }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AgentError::Unauthorized)
    }

    /// Whether retrying the same request later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AgentError::Network { .. } | AgentError::Timeout { .. } => true,
            AgentError::Status { status } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_maps_401_to_unauthorized() {
        assert!(AgentError::from_status(401).is_unauthorized());
        assert!(matches!(AgentError::from_status(404), AgentError::Status { status: 404 }));
    }

    #[test]
    fn transient_covers_transport_and_5xx() {
        assert!(AgentError::network("refused").is_transient());
        assert!(AgentError::Timeout { after_ms: 10 }.is_transient());
        assert!(AgentError::from_status(503).is_transient());
        assert!(!AgentError::from_status(400).is_transient());
        assert!(!AgentError::malformed("eof").is_transient());
        assert!(!AgentError::Unauthorized.is_transient());
    }

    #[test]
    fn display_messages_carry_context() {
        let err = AgentError::Config { key: "ZURT_LOCALE".into(), message: "empty".into() };
        assert_eq!(err.to_string(), "Invalid value for 'ZURT_LOCALE': empty");
        assert_eq!(AgentError::from_status(502).to_string(), "Server error: 502");
    }
}

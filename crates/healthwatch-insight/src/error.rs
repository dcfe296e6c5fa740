use thiserror::Error;

/// Errors from the insight chat-completions client.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Network or TLS failure from the underlying HTTP client, including
    /// request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl InsightError {
    /// User-facing advisory shown in place of an insight when generation
    /// fails. Presentation only; callers log the typed error separately.
    #[must_use]
    pub fn advisory(&self) -> String {
        match self {
            InsightError::UnexpectedStatus { status, .. } => {
                format!("AI service error ({status}). Please check your HF_API_KEY.")
            }
            InsightError::Http(e) if e.is_timeout() => {
                "AI insight timed out. Please try syncing again.".to_owned()
            }
            InsightError::Http(e) if e.is_connect() => {
                "AI service unreachable. Please check your network connection.".to_owned()
            }
            _ => "AI insight unavailable. Please ensure HF_API_KEY is configured correctly."
                .to_owned(),
        }
    }
}

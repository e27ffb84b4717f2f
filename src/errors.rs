use std::time::Duration;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceUnavailable {
    #[error("no extraction backend compiled in")]
    CapabilityMissing,

    #[error("OPENAI_API_KEY is not set")]
    CredentialMissing,

    #[error("failed to initialise extraction backend: {0}")]
    Init(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("extraction service unavailable: {0}")]
    Unavailable(#[from] ServiceUnavailable),

    #[error("extraction service call failed: {0:#}")]
    Invocation(anyhow::Error),

    #[error("extraction service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("non-textual response from extraction service: {0}")]
    UnusableResponse(String),

    #[error("invalid JSON from extraction service: {0}")]
    InvalidJson(String),

    #[error("extraction payload is not a JSON object: {0}")]
    NotAnObject(String),
}

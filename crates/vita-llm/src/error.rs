use thiserror::Error;

/// Unified error type for chat-completion operations
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("api error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("rate limited")]
    RateLimited,
}

pub type Result<T> = std::result::Result<T, LlmError>;

pub mod error;
pub mod openai;
pub mod provider;

pub use error::{LlmError, Result};
pub use openai::OpenAiProvider;
pub use provider::{ChatProvider, ProviderConfig};

//! The conversational core: rule-based response overrides plus the
//! assistant gateway that turns one user submission into exactly one
//! assistant turn.

pub mod gateway;
pub mod prompt;
pub mod rules;

pub use gateway::{Gateway, GatewayError, Reply, ReplyKind};
pub use prompt::persona_prompt;
pub use rules::classify;

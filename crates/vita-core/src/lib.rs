pub mod artifact;
pub mod chat;
pub mod message;
pub mod profile;

pub use artifact::{Artifact, ArtifactData, ExportFormat, SamplePoint, StepItem, TimelineRow};
pub use chat::{ChatOptions, ChatRequest, ChatResponse, ChatUsage};
pub use message::{Message, MessageId, Role};
pub use profile::Profile;

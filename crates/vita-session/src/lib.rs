//! In-memory, session-scoped conversation logs.
//!
//! One session per connected visitor; sessions hold an append-only list of
//! turns, live only in memory, and are swept once idle past a TTL. There is
//! deliberately no storage layer: a session dies with the visit.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{SessionError, SessionResult};
pub use manager::SessionManager;
pub use types::Session;

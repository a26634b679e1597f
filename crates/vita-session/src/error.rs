use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {id}")]
    NotFound { id: String },
}

pub type SessionResult<T> = Result<T, SessionError>;

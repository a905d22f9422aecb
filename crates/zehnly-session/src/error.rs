use thiserror::Error;

/// Errors from session persistence
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("credential store error: {0}")]
    Storage(String),
}

impl SessionError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

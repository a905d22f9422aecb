use serde::Deserialize;
use thiserror::Error;

/// Unified error type for admin API calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP 401. The session has already been cleared by the time the
    /// caller sees this; the error still surfaces for UI messaging.
    #[error("authentication error: {message}")]
    Unauthorized {
        code: Option<String>,
        message: String,
    },

    /// Any other non-success status, with the server's error code and
    /// message when the body carried them
    #[error("api error: {status} - {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a non-success response into the taxonomy.
    ///
    /// Error bodies come in two shapes: `{"error": {"code": "..."}}` and
    /// `{"error": "message"}`. Anything else keeps the raw body as the
    /// message.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let (code, message) = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => match parsed.error {
                ErrorPayload::Coded { code } => (Some(code), body.to_string()),
                ErrorPayload::Message(message) => (None, message),
            },
            Err(_) => (None, body.to_string()),
        };

        if status == 401 {
            let message = code.clone().unwrap_or_else(|| {
                if message.is_empty() {
                    "unauthorized".to_string()
                } else {
                    message.clone()
                }
            });
            ApiError::Unauthorized { code, message }
        } else {
            let message = if message.is_empty() {
                format!("HTTP {status}")
            } else {
                message
            };
            ApiError::Api {
                status,
                code,
                message,
            }
        }
    }

    /// Server error code, when one was present in the body
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { code, .. } | ApiError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest_middleware::Error> for ApiError {
    fn from(e: reqwest_middleware::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorPayload,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Coded { code: String },
    Message(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors raised while building, sending or decoding Adyen requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Invalid payment request: {message}")]
    InvalidRequest { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Adyen API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GatewayError {
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the host may reasonably retry the failed call.
    ///
    /// No retries happen inside this crate; this is advisory only.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport { .. } => true,
            GatewayError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::decode(format!("Response body error: {}", err))
        } else if err.is_timeout() {
            GatewayError::transport(format!("Request timed out: {}", err))
        } else {
            GatewayError::transport(format!("Request error: {}", err))
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::decode(format!("JSON error: {}", err))
    }
}

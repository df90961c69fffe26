use thiserror::Error;

/// Top-level error type for Courier.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Network or HTTP failure reaching the Bot API.
    #[error("transport error: {0}")]
    Transport(String),

    /// Well-formed failure envelope returned by the Bot API.
    #[error("api error {code}: {description}")]
    Api {
        code: i64,
        description: String,
        /// Seconds the server asked us to wait before the next request.
        retry_after: Option<u64>,
    },

    /// Malformed JSON or an unrecognized discriminator.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request body could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// A parameter constraint failed before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CourierError {
    /// Server-requested delay before retrying, if any.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

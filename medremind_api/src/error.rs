use thiserror::Error;

/// Every way a call to the reminder backend can fail.
///
/// Callers do not tell these apart when reporting to the user; there is no
/// retry, so all of them are terminal for the request that produced them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected response payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Decode(value.to_string())
    }
}

use thiserror::Error;

/// Errors surfaced by client operations.
///
/// Decode failures are fatal to the call that produced them: a response
/// either decodes fully or the whole operation fails. Typed custom-field
/// lookups never land here; a missing or mis-shaped entry is an `Option`
/// on the accessor.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The base URL or a joined endpoint path was not a valid URL.
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// Non-2xx response, with the messages from the service's error body.
    #[error("service error ({status}): {}", .messages.join("; "))]
    Api { status: u16, messages: Vec<String> },

    /// The response body was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

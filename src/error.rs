use thiserror::Error;

/// Failure taxonomy for one backend round trip.
///
/// `Backend` carries a business error the backend embedded in an otherwise
/// successful JSON body; its `Display` is the backend's literal message so
/// controllers can surface it verbatim. Everything else is the generic
/// failure surface.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("{0}")]
    Backend(String),

    #[error("invalid payload: {0}")]
    Invalid(String),
}

impl FetchError {
    /// The backend's own wording, where a flow must echo it to the user.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            FetchError::Backend(msg) => Some(msg),
            _ => None,
        }
    }
}

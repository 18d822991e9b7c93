use thiserror::Error;

/// Failures at the completion-service boundary.
///
/// The submission boundary collapses all of these into a single "could not
/// understand the prompt" class toward the user; the variants exist so logs
/// can tell a transport failure from a malformed model response.
#[derive(Debug, Error)]
pub enum AiError {
    /// No credential configured; AI parsing is degraded, nothing else is.
    #[error("no AI credential configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// Transport-level failure talking to the completion service.
    #[error("request to the completion service failed: {0}")]
    Http(String),

    /// The completion service answered with a non-success status.
    #[error("completion service returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered, but with no usable candidate text.
    #[error("completion service returned no candidate text")]
    EmptyResponse,

    /// The candidate text did not match the requested schema.
    #[error("unexpected response from the model: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

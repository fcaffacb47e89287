use thiserror::Error;

#[derive(Error, Debug)]
pub enum HydraError {
    /// Caller input was rejected before any file was read or request sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failure or a non-success HTTP status. The response body is not read.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a success status but not with the expected body.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl HydraError {
    /// HTTP status of the failed response, when the error came from one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            HydraError::Http(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HydraError>;

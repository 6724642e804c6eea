use thiserror::Error;

/// Errors returned by every client operation.
///
/// The three variants are distinct causes; match on them (or on [`ErrorKind`])
/// instead of inspecting the message.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The location or name argument cannot be used to build a query.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream service returned no record for the resolved query.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request could not be completed or its body could not be decoded.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures of the HTTP collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client itself could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Network level failure (connect, TLS, timeout, body read).
    #[error("Request to '{path}' failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Request to '{path}' failed with status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    /// The body was not the JSON shape we expected.
    #[error("Failed to decode response from '{path}': {message}")]
    Decode { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Transport,
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            WeatherError::NotFound(_) => ErrorKind::NotFound,
            WeatherError::Transport(_) => ErrorKind::Transport,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

use crate::cli::CLIError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Connection reset before the message was complete")]
    ConnectionReset,
    #[error("No status in response")]
    NoResponse,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error("Server answered with status {0}")]
    Status(u16),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed HTTP message: {0}")]
    Parse(#[from] httparse::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
    #[error(transparent)]
    Route(#[from] matchit::InsertError),
    #[error(transparent)]
    Cli(#[from] CLIError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status a server should answer with when a handler fails with this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::BadRequest(_) | Error::Json(_) | Error::Parse(_) => 400,
            Error::MethodNotAllowed(_) => 405,
            _ => 500,
        }
    }
}

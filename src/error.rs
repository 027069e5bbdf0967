use std::path::PathBuf;

use term::TermError;

/// Error type for every store operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Missing or empty argument, malformed URI, path outside the base
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Malformed term or graph file content
    #[error("parse error: {0}")]
    Parse(String),

    /// Blank nodes
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Unregistered graph URI
    #[error("graph does not exist: {0}")]
    NotFound(String),

    /// Missing or unreadable file or base directory
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed metadata document
    #[error("corrupt metadata: {0}")]
    CorruptMetadata(String),

    /// Operation not allowed in the current lifecycle state
    #[error("{0}")]
    State(String),

    /// Neither the statement, the call, nor the store names a graph
    #[error("neither an explicit graph URI was given nor a default graph URI was set")]
    NoGraphResolved,

    /// Wildcard in a statement that must be concrete
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Prefix a term error with the line of the graph file it came from.
    pub(crate) fn at_line(line: usize, error: TermError) -> Self {
        match error {
            TermError::UnsupportedFeature { message } => {
                Self::UnsupportedFeature(format!("line {line}: {message}"))
            }
            TermError::Parse { message } | TermError::Invalid { message } => {
                Self::Parse(format!("line {line}: {message}"))
            }
        }
    }
}

impl From<TermError> for StoreError {
    fn from(error: TermError) -> Self {
        match error {
            TermError::Parse { message } => Self::Parse(message),
            TermError::UnsupportedFeature { message } => Self::UnsupportedFeature(message),
            TermError::Invalid { message } => Self::Validation(message),
        }
    }
}

/// Check a graph URI argument.
pub(crate) fn check_uri(uri: &str) -> Result<&str> {
    if term::is_valid_uri(uri) {
        Ok(uri)
    } else {
        Err(StoreError::Validation(format!("URI is not valid: {uri}")))
    }
}

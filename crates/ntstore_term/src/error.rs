/// Error type for term parsing and validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    /// Malformed lexical form
    #[error("{message}")]
    Parse { message: String },

    /// Well-formed but not representable in the store (blank nodes)
    #[error("{message}")]
    UnsupportedFeature { message: String },

    /// Term used in a position it cannot occupy, or carrying a bad URI
    #[error("{message}")]
    Invalid { message: String },
}

pub type Result<T> = std::result::Result<T, TermError>;

impl TermError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

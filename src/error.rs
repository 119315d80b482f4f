//! Error types for FIQL parsing.

/// Result type alias using [`FiqlError`].
pub type Result<T> = std::result::Result<T, FiqlError>;

/// Errors raised while turning FIQL text into a condition tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FiqlError {
    /// Malformed query text.
    #[error("invalid FIQL at offset {offset}: {message}")]
    Parse {
        /// Byte offset into the input where parsing stopped.
        offset: usize,
        /// What was expected or found.
        message: String,
    },

    /// Selector not allowed by the parse context.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),
}

impl FiqlError {
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        FiqlError::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Byte offset of the failure, when known
    pub fn offset(&self) -> Option<usize> {
        match self {
            FiqlError::Parse { offset, .. } => Some(*offset),
            FiqlError::UnknownProperty(_) => None,
        }
    }
}

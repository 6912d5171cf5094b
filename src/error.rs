//! Error types for ctxpick

use thiserror::Error;

/// Errors that can stop a ctxpick run
#[derive(Debug, Error)]
pub enum CtxpickError {
    /// No file paths were given on the command line
    #[error("no input files given")]
    NoInputPaths,

    /// The requested token encoding is not one we know about
    #[error("unknown token encoding '{name}' (available: {})", .available.join(", "))]
    UnknownEncoding { name: String, available: Vec<String> },

    /// The tokenizer tables could not be loaded
    #[error("failed to load tokenizer: {0}")]
    TokenizerInit(String),

    /// User configuration could not be read or written
    #[error("configuration error: {0}")]
    Config(String),

    /// The system clipboard rejected the text
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// A preprocessing task panicked or was cancelled
    #[error("preprocessing task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CtxpickError {
    /// Whether this error comes from bad input or configuration rather than from I/O
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CtxpickError::NoInputPaths
                | CtxpickError::UnknownEncoding { .. }
                | CtxpickError::TokenizerInit(_)
                | CtxpickError::Config(_)
        )
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CtxpickError::Clipboard(_) => crate::EXIT_SINK_ERROR,
            e if e.is_configuration() => crate::EXIT_CONFIG_ERROR,
            _ => crate::EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, CtxpickError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_encoding_lists_available() {
        let err = CtxpickError::UnknownEncoding {
            name: "gpt9".to_string(),
            available: vec!["cl100k_base".to_string(), "o200k_base".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'gpt9'"));
        assert!(msg.contains("cl100k_base, o200k_base"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CtxpickError::NoInputPaths.exit_code(), crate::EXIT_CONFIG_ERROR);
        assert_eq!(
            CtxpickError::Config("bad".to_string()).exit_code(),
            crate::EXIT_CONFIG_ERROR
        );
        assert_eq!(
            CtxpickError::Clipboard("no display".to_string()).exit_code(),
            crate::EXIT_SINK_ERROR
        );
        assert_eq!(
            CtxpickError::Task("panicked".to_string()).exit_code(),
            crate::EXIT_FAILURE
        );
    }
}

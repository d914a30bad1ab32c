//! Error types for command registration and dispatch.

use thiserror::Error;

/// Errors raised while registering or parsing commands.
///
/// `NoMatch`, `Mismatch` and `Coercion` are the dispatch failures a shell is
/// expected to report and recover from. `Handler` wraps whatever the invoked
/// handler itself returned.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// No registered prefix starts the input
    #[error("\"{0}\" does not match any command")]
    NoMatch(String),

    /// A prefix matched but the argument count did not
    #[error("\"{text}\" does not match \"{signature}\"")]
    Mismatch { text: String, signature: String },

    /// A token was rejected by its parameter type
    #[error("\"{token}\" invalid as \"{parameter}\" for \"{signature}\": {reason}")]
    Coercion {
        token: String,
        parameter: String,
        signature: String,
        reason: String,
    },

    /// A command could not be built from its definition
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A parameter type name is not known to the coercer registry
    #[error("Unknown parameter type: {0}")]
    UnknownType(String),

    /// The handler ran and failed
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl ShelfError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, ShelfError::NoMatch(_))
    }

    /// True for the errors raised once a command has been selected, before its
    /// handler runs.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ShelfError::Mismatch { .. } | ShelfError::Coercion { .. })
    }
}

/// Result type alias for shelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_inputs() {
        let err = ShelfError::NoMatch("frobnicate 1".to_string());
        assert_eq!(err.to_string(), "\"frobnicate 1\" does not match any command");
        assert!(err.is_no_match());
        assert!(!err.is_parse_error());

        let err = ShelfError::Coercion {
            token: "abc".to_string(),
            parameter: "a".to_string(),
            signature: "get <a:int>".to_string(),
            reason: "expected int".to_string(),
        };
        assert!(err.to_string().starts_with("\"abc\" invalid as \"a\" for \"get <a:int>\""));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_handler_errors_are_transparent() {
        let err: ShelfError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
        assert!(!err.is_parse_error());
        assert!(!err.is_no_match());
    }
}

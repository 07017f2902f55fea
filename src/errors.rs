//! Error handling for the oncoscope runtime.
//!
//! Input-boundary failures are carried as [`InvalidInputError`] so callers
//! can tell a wrong token count apart from an unparseable token, while
//! everything else lives on [`ScreenError`].

use std::path::PathBuf;
use thiserror::Error;

/// Validation failures raised at the input boundary, before any
/// classifier call. No session state is mutated when one of these is
/// returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("expected {expected} measurements, got {actual}")]
    WrongArity { expected: usize, actual: usize },

    #[error("measurement {index} is not a number: '{token}'")]
    NonNumeric { index: usize, token: String },

    #[error("measurement {index} is not finite")]
    NonFinite { index: usize },
}

/// Main error type for the oncoscope runtime.
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The classifier artifact could not be read at startup. Fatal: the
    /// interactive surface must not open without a model.
    #[error("classifier artifact unavailable at {path}: {source}")]
    ModelUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("classifier artifact malformed: {context}")]
    Artifact {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("dataset error: {message}")]
    Dataset { message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("report export failed: {message}")]
    Report { message: String },
}

/// Type alias for Result with ScreenError.
pub type ScreenResult<T> = Result<T, ScreenError>;

impl ScreenError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create an artifact error
    pub fn artifact(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Artifact {
            context: context.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create a report export error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }

    /// True for failures the input boundary recovers from locally.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Report { .. })
    }
}

impl From<figment::Error> for ScreenError {
    fn from(err: figment::Error) -> Self {
        ScreenError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages() {
        let arity = InvalidInputError::WrongArity {
            expected: 30,
            actual: 5,
        };
        assert!(arity.to_string().contains("expected 30"));

        let token = InvalidInputError::NonNumeric {
            index: 2,
            token: "abc".into(),
        };
        assert!(token.to_string().contains("'abc'"));
    }

    #[test]
    fn test_error_chaining() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let screen_err = ScreenError::ModelUnavailable {
            path: PathBuf::from("models/missing.json"),
            source: io_err,
        };

        assert!(screen_err.source().is_some());
        assert!(screen_err.to_string().contains("models/missing.json"));
    }

    #[test]
    fn test_recoverable_classification() {
        let input: ScreenError = InvalidInputError::NonFinite { index: 0 }.into();
        assert!(input.is_recoverable());

        let config = ScreenError::config("bad feature set");
        assert!(!config.is_recoverable());
    }
}

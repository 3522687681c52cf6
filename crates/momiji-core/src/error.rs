//! Error types and handling for syntax tree operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for syntax tree operations
#[derive(Debug, Error)]
pub enum MomijiError {
    /// A parse tree element has no translation rule
    #[error("Unsupported construct `{kind}`: {snippet}")]
    UnsupportedConstruct { kind: String, snippet: String },

    /// A parse tree element is missing a structurally required part
    #[error("Malformed reference in {context}: {message}")]
    MalformedReference { context: String, message: String },

    /// A registry operation touched a path with no registered source text
    #[error("No source registered for path {path:?}")]
    NullSource { path: PathBuf },

    /// Parse errors from tree-sitter
    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// File system I/O errors
    #[error("IO error for path {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedConstruct,
    MalformedReference,
    NullSource,
    Parse,
    Io,
}

impl MomijiError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MomijiError::UnsupportedConstruct { .. } => ErrorKind::UnsupportedConstruct,
            MomijiError::MalformedReference { .. } => ErrorKind::MalformedReference,
            MomijiError::NullSource { .. } => ErrorKind::NullSource,
            MomijiError::ParseError { .. } => ErrorKind::Parse,
            MomijiError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Check if this error is recoverable (lenient analysis can continue
    /// past it by freezing the construct as an opaque node)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnsupportedConstruct)
    }

    /// Create an unsupported construct error
    pub fn unsupported_construct(kind: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            kind: kind.into(),
            snippet: snippet.into(),
        }
    }

    /// Create a malformed reference error
    pub fn malformed_reference(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedReference {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a null source error
    pub fn null_source(path: impl Into<PathBuf>) -> Self {
        Self::NullSource { path: path.into() }
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for MomijiError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all moo operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MooError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed version, constraint operator, or dependency expression.
    #[error("Format error: {message}")]
    #[diagnostic(help("Dependencies look like `Foo`, `Foo 1.2.3`, `Foo >= 1.0 < 2.0` or `Foo ~> 5.0`"))]
    Format { message: String },

    /// No source produced a package matching the requested dependency.
    #[error("Package not found: {dependency}")]
    #[diagnostic(help("Check the package name, or list configured sources with `moo source list`"))]
    PackageNotFound { dependency: String },

    /// The source backend does not implement the requested operation.
    #[error("Source '{source_name}' does not support {operation}")]
    Unsupported {
        source_name: String,
        operation: &'static str,
    },

    /// Network request or download failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Reading, writing or extracting a package archive failed.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Invalid or malformed package manifest (nuspec), feed document or Moofile.
    #[error("Manifest error: {message}")]
    Manifest { message: String },

    /// Invalid or unreadable configuration file.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check ~/.moo/config.toml for syntax errors"))]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl MooError {
    /// Shorthand for a [`MooError::Format`] with the given message.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Shorthand for a [`MooError::Unsupported`] raised by the named source.
    pub fn unsupported(source_name: &str, operation: &'static str) -> Self {
        Self::Unsupported {
            source_name: source_name.to_string(),
            operation,
        }
    }
}

/// Convenience alias for results carrying a [`MooError`].
pub type MooResult<T> = Result<T, MooError>;

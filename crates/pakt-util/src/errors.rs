use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all pakt operations.
///
/// The resolver surfaces registry failures unchanged, so a caller of the
/// resolution entry point sees exactly the variant the registry produced.
#[derive(Debug, Error, Diagnostic)]
pub enum PaktError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Pakt.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Pakt.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid global configuration.
    #[error("Config error: {message}")]
    Config { message: String },

    /// A string that has to be an exact semantic version is not one.
    #[error("invalid version {version}")]
    #[diagnostic(help("Exact versions look like `1.2.3` or `1.2.3-beta.1`"))]
    InvalidVersion { version: String },

    /// A dependency specifier is neither an exact version nor a range or tag.
    #[error("invalid version expression {expression}")]
    #[diagnostic(help("Use an exact version, a range such as `^1.2.0`, or `latest`"))]
    InvalidVersionExpression { expression: String },

    /// No published version satisfies the requested expression.
    #[error("unable to find suitable version of {name} for {expression}")]
    VersionNotFound { name: String, expression: String },

    /// The registry does not know the package at all.
    #[error("Package not found: {name}")]
    PackageNotFound { name: String },

    /// The registry answered, but with data that cannot be used.
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// Network request failed.
    #[error("Network error: {message}")]
    Network { message: String },
}

impl PaktError {
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    pub fn invalid_expression(expression: impl Into<String>) -> Self {
        Self::InvalidVersionExpression {
            expression: expression.into(),
        }
    }

    pub fn version_not_found(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::VersionNotFound {
            name: name.into(),
            expression: expression.into(),
        }
    }

    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}

/// Result alias used by the library crates.
pub type PaktResult<T> = Result<T, PaktError>;

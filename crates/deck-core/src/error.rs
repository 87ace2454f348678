//! Error types and handling for deck-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T, Error>`]. The
//! loaders decide where errors are contained:
//!
//! - **Slide-level** failures ([`Error::MissingMetadata`], [`Error::ResourceNotFound`],
//!   [`Error::Slide`]) are logged and skipped by the topic loaders, so a topic
//!   with a broken slide still renders the rest.
//! - **Course-level** failures ([`Error::MetadataLoad`], [`Error::CourseNotFound`])
//!   propagate up to the registry, which logs them once and reports the course as
//!   unavailable.
//!
//! ## Recovery Hints
//!
//! ```rust
//! use deck_core::Error;
//!
//! let err = Error::ResourceNotFound {
//!     path: "cs101/intro/slide-1.md".to_string(),
//!     reason: "HTTP 404".to_string(),
//! };
//! assert_eq!(err.category(), "not_found");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for deck-core operations.
///
/// Errors keep their source chain, so `Debug` output and [`std::error::Error::source`]
/// show the underlying I/O, HTTP or parse failure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Raised by the filesystem fetcher and by configuration loading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Raised by the HTTP fetcher for connection failures, timeouts and
    /// non-404 error statuses.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Slide front matter could not be parsed.
    ///
    /// ## Common Causes
    ///
    /// - Opening `---` without a closing `---`
    /// - Invalid YAML syntax in the header
    /// - A header that is a list or scalar instead of a mapping
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required slide header fields are missing or empty.
    #[error("Missing slide metadata: {}", fields.join(", "))]
    MissingMetadata {
        /// Names of the missing fields, in declaration order (`id`, `title`).
        fields: Vec<&'static str>,
    },

    /// A content resource could not be fetched.
    ///
    /// Covers non-OK HTTP statuses, missing files and transport failures for a
    /// single path. There are no retries at this layer.
    #[error("Resource not found at '{path}': {reason}")]
    ResourceNotFound {
        /// Content-relative path that was requested.
        path: String,
        /// Underlying failure description.
        reason: String,
    },

    /// A slide failed to load, tagged with the path it came from.
    #[error("Failed to load slide '{path}': {source}")]
    Slide {
        /// Content-relative path of the slide.
        path: String,
        /// The parse or fetch failure.
        #[source]
        source: Box<Error>,
    },

    /// The requested course id has no registered source.
    #[error("Course not found: {0}")]
    CourseNotFound(String),

    /// The course metadata document could not be fetched or parsed.
    ///
    /// Never cached: the next metadata request retries the fetch.
    #[error("Failed to load course metadata from '{path}': {reason}")]
    MetadataLoad {
        /// Content-relative path of the metadata document.
        path: String,
        /// Underlying failure description.
        reason: String,
    },

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A content origin URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Wrap a slide-level failure with the path it was loaded from.
    ///
    /// Already-tagged errors are returned unchanged.
    #[must_use]
    pub fn at_path(self, path: impl Into<String>) -> Self {
        match self {
            tagged @ Self::Slide { .. } => tagged,
            other => Self::Slide {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for transient transport failures (timeouts, refused
    /// connections, interrupted I/O). Missing content and malformed documents
    /// are permanent.
    ///
    /// ```rust
    /// use deck_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "slow disk")).is_recoverable());
    /// assert!(!Error::Parse("unterminated front matter".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            Self::Slide { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful as a structured logging field. Tagged slide errors report the
    /// category of their source.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::MissingMetadata { .. } => "missing_metadata",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Slide { source, .. } => source.category(),
            Self::CourseNotFound(_) => "course_not_found",
            Self::MetadataLoad { .. } => "metadata",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for deck-core results.
pub type Result<T> = std::result::Result<T, Error>;

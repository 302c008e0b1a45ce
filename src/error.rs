use thiserror::Error;

use crate::report::ErrorReport;

/// Configuration-time validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The storage root directory was empty.
    #[error("root storage directory cannot be empty")]
    EmptyRootDirectory,
    /// No extension/MIME pairs were configured, so every upload would be rejected.
    #[error("allowed MIME policy must contain at least one extension")]
    EmptyMimePolicy,
    /// A policy extension contains a separator or path character.
    #[error("invalid extension `{extension}` in MIME policy")]
    InvalidExtension {
        /// The offending extension key.
        extension: String,
    },
    /// A policy MIME value is malformed.
    #[error("invalid MIME type `{mime}` for extension `{extension}`")]
    InvalidMimeType {
        /// Extension the MIME type was configured for.
        extension: String,
        /// The invalid MIME value.
        mime: String,
    },
}

/// Environment failures raised while preparing storage.
///
/// These indicate a deployment or permissions problem rather than a bad upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Generic storage failure with message context.
    #[error("{message}")]
    Message {
        /// Storage failure message.
        message: String,
    },
}

impl StorageError {
    /// Creates a storage error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Error returned by [`UploadValidator::process`](crate::UploadValidator::process).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    /// The upload failed validation or could not be saved; the report carries
    /// user-facing messages.
    #[error(transparent)]
    Rejected(#[from] ErrorReport),
    /// Configuration error surfaced at processing time.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Storage could not be prepared.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl UploadError {
    /// Returns the error report for rejected uploads.
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            Self::Rejected(report) => Some(report),
            _ => None,
        }
    }

    /// Consumes the error and returns the error report for rejected uploads.
    pub fn into_report(self) -> Option<ErrorReport> {
        match self {
            Self::Rejected(report) => Some(report),
            _ => None,
        }
    }

    /// Returns `true` when the failure was caused by the upload itself rather
    /// than by the environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

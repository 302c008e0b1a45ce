use std::path::PathBuf;

use thiserror::Error;

/// Structured description of a rejected upload.
///
/// Besides the user-facing messages, the report keeps whatever the pipeline had
/// computed before it stopped so the caller can log it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{}", .messages.join(" "))]
pub struct ErrorReport {
    /// Human-readable failure messages, in the order they were produced.
    pub messages: Vec<String>,
    /// Filename the upload would have been stored under, once computed.
    pub filename: Option<String>,
    /// Filename supplied by the client.
    pub original_filename: String,
    /// MIME type declared by the client.
    pub mime_type: String,
    /// Size declared by the client, in bytes.
    pub size: u64,
    /// Destination directory, once computed.
    pub path: Option<PathBuf>,
}

impl ErrorReport {
    pub(crate) fn new(
        original_filename: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            original_filename: original_filename.into(),
            mime_type: mime_type.into(),
            size,
            ..Self::default()
        }
    }

    pub(crate) fn with_destination(mut self, filename: impl Into<String>, path: PathBuf) -> Self {
        self.filename = Some(filename.into());
        self.path = Some(path);
        self
    }

    pub(crate) fn push(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Returns the first recorded message.
    pub fn message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }

    /// Returns `true` when any message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.messages.iter().any(|message| message.contains(needle))
    }
}

use std::path::PathBuf;

use crate::{error::ConfigError, limits::Limits};

/// Validation and storage policy for uploads.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Root directory files are stored under.
    pub root_directory: PathBuf,
    /// MIME/extension policy and size limit.
    pub limits: Limits,
    /// Store under `root/YEAR/MONTH/DAY` instead of directly in `root`.
    pub date_sorted: bool,
}

impl UploadConfig {
    /// Creates a date-sorted configuration rooted at `root_directory`.
    pub fn new(root_directory: impl Into<PathBuf>, limits: Limits) -> Self {
        Self {
            root_directory: root_directory.into(),
            limits,
            date_sorted: true,
        }
    }

    /// Enables or disables date-sorted storage.
    pub fn with_date_sorting(mut self, date_sorted: bool) -> Self {
        self.date_sorted = date_sorted;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_directory.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRootDirectory);
        }
        self.limits.validate()
    }
}

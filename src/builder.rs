use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};

use crate::{
    clock::Clock,
    config::UploadConfig,
    error::ConfigError,
    limits::Limits,
    storage::{DiskStorage, FilenameStrategy},
    UploadValidator,
};

/// Builder for configuring an [`UploadValidator`].
#[derive(Debug, Clone)]
pub struct UploadValidatorBuilder {
    config: UploadConfig,
    strategy: FilenameStrategy,
    clock: Clock,
}

impl Default for UploadValidatorBuilder {
    fn default() -> Self {
        Self {
            config: UploadConfig::new(PathBuf::new(), Limits::default()),
            strategy: FilenameStrategy::default(),
            clock: Clock::system(),
        }
    }
}

impl UploadValidatorBuilder {
    /// Creates a builder with date sorting enabled and an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current builder configuration snapshot.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Replaces the full builder configuration.
    pub fn with_config(mut self, config: UploadConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the root storage directory.
    pub fn root_directory(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root_directory = root.into();
        self
    }

    /// Allows uploads ending in `extension` declared as `mime`.
    pub fn allow(mut self, extension: impl Into<String>, mime: impl Into<String>) -> Self {
        self.config
            .limits
            .allowed_extensions
            .insert(extension.into(), mime.into());
        self
    }

    /// Adds several `extension => mime` pairs.
    pub fn allowed_extensions<I, E, M>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (E, M)>,
        E: Into<String>,
        M: Into<String>,
    {
        self.config.limits.allowed_extensions.extend(
            pairs
                .into_iter()
                .map(|(extension, mime)| (extension.into(), mime.into())),
        );
        self
    }

    /// Sets the maximum accepted size in bytes.
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.config.limits.max_size = max_size;
        self
    }

    /// Replaces the MIME policy and size limit.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.config.limits = limits;
        self
    }

    /// Enables or disables `root/YEAR/MONTH/DAY` storage.
    pub fn date_sorted(mut self, date_sorted: bool) -> Self {
        self.config.date_sorted = date_sorted;
        self
    }

    /// Sets how stored filenames are generated.
    pub fn filename(mut self, strategy: FilenameStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the time source.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Pins the time source to `instant`.
    pub fn fixed_time(self, instant: DateTime<FixedOffset>) -> Self {
        self.clock(Clock::fixed(instant))
    }

    /// Validates builder configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    /// Finalizes and returns validated configuration.
    pub fn build_config(self) -> Result<UploadConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Builds a validator from the accumulated settings.
    pub fn build(self) -> Result<UploadValidator, ConfigError> {
        self.config.validate()?;
        Ok(UploadValidator {
            config: self.config,
            storage: DiskStorage::new(self.strategy),
            clock: self.clock,
        })
    }
}

#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Validates a file uploaded through an HTML form and moves it into permanent
//! storage.
//!
//! An [`UploadValidator`] runs one upload through a fixed pipeline: transport
//! error check, filename decomposition, destination computation, MIME/extension
//! policy, size limit, then the move into `root` (or `root/YEAR/MONTH/DAY`).
//! The result is either a [`StoredFile`] or an [`UploadError`]; rejected
//! uploads carry an [`ErrorReport`] with user-facing messages, while broken
//! storage surfaces as [`UploadError::Storage`].

/// Fluent builder API.
pub mod builder;
/// Time source.
pub mod clock;
/// Upload policy configuration.
pub mod config;
/// Error types exposed by this crate.
pub mod error;
/// Posted file fields grouped by form namespace.
pub mod field;
/// Client filename handling.
pub mod filename;
/// MIME/extension policy and size limit.
pub mod limits;
/// Rejection reports.
pub mod report;
/// Upload request model.
pub mod request;
/// Stored-file descriptor and disk persistence.
pub mod storage;

pub use builder::UploadValidatorBuilder;
pub use clock::Clock;
pub use config::UploadConfig;
pub use error::{ConfigError, StorageError, UploadError};
pub use field::{FileField, PostedFiles};
pub use filename::{split_extension, FileNameParts};
pub use limits::Limits;
pub use report::ErrorReport;
pub use request::{TransportError, UploadRequest};
pub use storage::{DiskStorage, FilenameStrategy, StoredFile};

const SAVE_FAILED: &str = "The file could not be saved for no apparent reason. Try again.";

/// Main entry point: validates uploads and stores accepted ones.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    config: UploadConfig,
    storage: DiskStorage,
    clock: Clock,
}

impl UploadValidator {
    /// Creates a validator with timestamped filenames and the system clock.
    pub fn new(config: UploadConfig) -> Result<Self, ConfigError> {
        Self::builder().with_config(config).build()
    }

    /// Creates a fluent builder.
    pub fn builder() -> UploadValidatorBuilder {
        UploadValidatorBuilder::default()
    }

    /// Returns an immutable reference to the active configuration.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Returns the disk storage used for accepted uploads.
    pub fn storage(&self) -> &DiskStorage {
        &self.storage
    }

    /// Runs `request` through the pipeline.
    ///
    /// Validation failures and failed moves return [`UploadError::Rejected`]
    /// without touching storage beyond the failed move itself. A destination
    /// directory that cannot be created returns [`UploadError::Storage`].
    pub async fn process(&self, request: UploadRequest) -> Result<StoredFile, UploadError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            namespace = request.namespace.as_str(),
            field_name = request.field_name.as_str(),
            original_filename = request.original_filename.as_str(),
            mime_type = request.mime_type.as_str(),
            size = request.size,
            "upload: begin processing"
        );

        if let Some(rejected) = transport_rejection(&request) {
            return Err(rejected);
        }
        let report = request_report(&request);

        let parts = split_extension(&request.original_filename);
        let now = self.clock.now();
        let directory = storage::destination_directory(
            &self.config.root_directory,
            self.config.date_sorted,
            &now,
        )?;
        let file_name = self.storage.choose_output_name(&parts, now.timestamp());
        let report = report.with_destination(file_name.as_str(), directory.clone());

        let limits = &self.config.limits;
        if let Err(message) = limits
            .check_mime(&request.mime_type, parts.extension)
            .and_then(|()| limits.check_size(request.size))
        {
            return Err(reject(report, message));
        }

        self.storage.ensure_directory(&directory).await?;

        let (file_name, path) = match self
            .storage
            .persist(&request.temp_path, &directory, &file_name)
            .await
        {
            Ok(stored) => stored,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    source = %request.temp_path.display(),
                    directory = %directory.display(),
                    error = %_err,
                    "upload: move into storage failed"
                );
                return Err(reject(report, SAVE_FAILED));
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            filename = file_name.as_str(),
            path = %path.display(),
            size = request.size,
            "upload: stored"
        );

        Ok(StoredFile {
            filename: file_name,
            mime_type: request.mime_type,
            original_filename: request.original_filename,
            path,
            size: request.size,
        })
    }

    /// Looks up `namespace[field]` in `posted` and processes it.
    ///
    /// A missing field is reported like transport code 4.
    pub async fn process_field(
        &self,
        posted: &PostedFiles,
        namespace: &str,
        field: &str,
    ) -> Result<StoredFile, UploadError> {
        let request = posted.request(namespace, field).unwrap_or_else(|| {
            UploadRequest::default()
                .with_field(namespace, field)
                .with_error_code(4)
        });
        self.process(request).await
    }
}

/// Processes a single upload with `config`.
///
/// Transport errors are reported before `config` is validated, so a request
/// that never carried a file is always rejected with its transport message.
pub async fn process(request: UploadRequest, config: &UploadConfig) -> Result<StoredFile, UploadError> {
    if let Some(rejected) = transport_rejection(&request) {
        return Err(rejected);
    }
    UploadValidator::new(config.clone())?.process(request).await
}

fn request_report(request: &UploadRequest) -> ErrorReport {
    ErrorReport::new(
        request.original_filename.as_str(),
        request.mime_type.as_str(),
        request.size,
    )
}

fn transport_rejection(request: &UploadRequest) -> Option<UploadError> {
    let transport = request.transport_error()?;
    Some(reject(request_report(request), transport.to_string()))
}

fn reject(report: ErrorReport, message: impl Into<String>) -> UploadError {
    let report = report.push(message);
    #[cfg(feature = "tracing")]
    tracing::warn!(
        original_filename = report.original_filename.as_str(),
        mime_type = report.mime_type.as_str(),
        size = report.size,
        reason = report.message().unwrap_or_default(),
        "upload: rejected"
    );
    UploadError::Rejected(report)
}

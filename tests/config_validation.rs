#![allow(missing_docs)]

use std::path::PathBuf;

use upload_gate::{process, ConfigError, Limits, UploadConfig, UploadError, UploadRequest};
use uuid::Uuid;

#[test]
fn accepts_complete_configuration() {
    let config = UploadConfig::new("/data", valid_limits());
    assert_eq!(config.validate(), Ok(()));
    assert!(config.date_sorted);
}

#[test]
fn rejects_empty_root_directory() {
    let config = UploadConfig::new("", valid_limits());
    assert_eq!(config.validate(), Err(ConfigError::EmptyRootDirectory));
}

#[test]
fn accepts_zero_max_size() {
    let config = UploadConfig::new("/data", valid_limits().with_max_size(0));
    assert_eq!(config.validate(), Ok(()));
}

#[tokio::test]
async fn zero_max_size_admits_only_empty_files() {
    let root = std::env::temp_dir().join(format!("upload-gate-test-{}", Uuid::new_v4()));
    let config = UploadConfig::new(&root, valid_limits().with_max_size(0)).with_date_sorting(false);

    let empty = upload_source(0).await;
    let stored = process(UploadRequest::new("blank.png", "image/png", 0, &empty), &config)
        .await
        .expect("empty upload fits a zero limit");
    assert_eq!(tokio::fs::metadata(&stored.path).await.expect("stored file exists").len(), 0);

    let one_byte = upload_source(1).await;
    let err = process(UploadRequest::new("dot.png", "image/png", 1, &one_byte), &config)
        .await
        .expect_err("non-empty upload exceeds a zero limit");
    assert!(err.report().expect("rejection carries a report").mentions("bigger than 0 bytes"));

    let _ = tokio::fs::remove_file(one_byte).await;
    let _ = tokio::fs::remove_dir_all(root).await;
}

#[test]
fn rejects_empty_mime_policy() {
    let config = UploadConfig::new("/data", Limits::new().with_max_size(10));
    assert_eq!(config.validate(), Err(ConfigError::EmptyMimePolicy));
}

#[test]
fn rejects_extension_with_separator() {
    let config = UploadConfig::new("/data", valid_limits().allow("tar.gz", "application/gzip"));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidExtension { extension }) if extension == "tar.gz"
    ));
}

#[test]
fn rejects_malformed_mime_type() {
    let config = UploadConfig::new("/data", valid_limits().allow("bin", "not a mime"));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidMimeType { extension, .. }) if extension == "bin"
    ));
}

#[tokio::test]
async fn process_surfaces_invalid_configuration() {
    let config = UploadConfig::new("", valid_limits());
    let err = process(
        UploadRequest::new("photo.png", "image/png", 1, "/nonexistent/tmp"),
        &config,
    )
    .await
    .expect_err("invalid config should fail");

    assert!(matches!(err, UploadError::Config(ConfigError::EmptyRootDirectory)));
    assert!(!err.is_recoverable());
    assert!(err.report().is_none());
}

fn valid_limits() -> Limits {
    Limits::new().allow("png", "image/png").with_max_size(5000)
}

async fn upload_source(len: usize) -> PathBuf {
    let path = std::env::temp_dir().join(format!("upload-gate-src-{}", Uuid::new_v4()));
    tokio::fs::write(&path, vec![b'x'; len]).await.expect("write upload source");
    path
}

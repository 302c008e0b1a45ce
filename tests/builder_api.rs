#![allow(missing_docs)]

use std::path::PathBuf;

use chrono::{FixedOffset, TimeZone};
use upload_gate::{
    Clock, ConfigError, FilenameStrategy, Limits, UploadConfig, UploadValidator,
    UploadValidatorBuilder,
};

#[test]
fn builder_defaults_to_date_sorting_and_timestamped_names() {
    let builder = UploadValidatorBuilder::default();
    assert!(builder.config().date_sorted);
    assert!(builder.config().limits.allowed_extensions.is_empty());

    let validator = builder
        .root_directory("/data")
        .allow("png", "image/png")
        .max_size(10)
        .build()
        .expect("builder config should validate");
    assert!(matches!(
        validator.storage().strategy(),
        FilenameStrategy::Timestamped
    ));
}

#[test]
fn fluent_chaining_sets_expected_configuration() {
    let validator = UploadValidator::builder()
        .root_directory("/srv/uploads")
        .allowed_extensions([("pdf", "application/pdf"), ("png", "image/png")])
        .max_size(2048)
        .date_sorted(false)
        .build()
        .expect("builder config should validate");

    assert_eq!(
        validator.config(),
        &UploadConfig {
            root_directory: PathBuf::from("/srv/uploads"),
            limits: Limits::new()
                .allow("pdf", "application/pdf")
                .allow("png", "image/png")
                .with_max_size(2048),
            date_sorted: false,
        }
    );
}

#[test]
fn build_surfaces_config_errors() {
    let result = UploadValidator::builder()
        .allow("png", "image/png")
        .max_size(10)
        .build();
    assert!(matches!(result, Err(ConfigError::EmptyRootDirectory)));

    let result = UploadValidator::builder()
        .root_directory("/data")
        .max_size(10)
        .build_config();
    assert_eq!(result, Err(ConfigError::EmptyMimePolicy));
}

#[test]
fn limits_replace_policy_wholesale() {
    let builder = UploadValidator::builder()
        .allow("gif", "image/gif")
        .limits(Limits::new().allow("png", "image/png").with_max_size(1));
    assert_eq!(builder.config().limits.extensions_for("image/gif"), Vec::<&str>::new());
    assert_eq!(builder.validate(), Err(ConfigError::EmptyRootDirectory));
}

#[test]
fn new_validates_configuration() {
    let config = UploadConfig::new("/data", Limits::new().with_max_size(10));
    assert!(matches!(
        UploadValidator::new(config),
        Err(ConfigError::EmptyMimePolicy)
    ));
}

#[test]
fn fixed_clock_returns_pinned_instant() {
    let instant = FixedOffset::east_opt(0)
        .expect("valid offset")
        .timestamp_opt(1_000, 0)
        .single()
        .expect("valid timestamp");
    let clock = Clock::fixed(instant);
    assert_eq!(clock.now(), instant);
    assert_eq!(format!("{clock:?}"), "Clock(<fn>)");
}

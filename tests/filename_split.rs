#![allow(missing_docs)]

use upload_gate::{filename::timestamped_name, split_extension, FileNameParts};

#[test]
fn splits_at_last_dot() {
    assert_eq!(
        split_extension("a.b.txt"),
        FileNameParts {
            leftover: "a.b",
            extension: Some("txt"),
        }
    );
    assert_eq!(split_extension("photo.png").leftover, "photo");
}

#[test]
fn name_without_dot_is_all_leftover() {
    let parts = split_extension("README");
    assert_eq!(parts.leftover, "README");
    assert_eq!(parts.extension, None);
}

#[test]
fn trailing_dot_has_no_extension() {
    let parts = split_extension("archive.");
    assert_eq!(parts.leftover, "archive");
    assert_eq!(parts.extension, None);
}

#[test]
fn dotfile_has_empty_leftover() {
    let parts = split_extension(".htaccess");
    assert_eq!(parts.leftover, "");
    assert_eq!(parts.extension, Some("htaccess"));
}

#[test]
fn timestamped_name_appends_timestamp_before_extension() {
    assert_eq!(
        timestamped_name(&split_extension("photo.png"), 1_713_900_000),
        "photo1713900000.png"
    );
    assert_eq!(timestamped_name(&split_extension("README"), 7), "README7");
}

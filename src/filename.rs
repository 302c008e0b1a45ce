/// Client filename split at its final `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameParts<'a> {
    /// Everything before the final `.`.
    pub leftover: &'a str,
    /// Everything after the final `.`, `None` when absent or empty.
    pub extension: Option<&'a str>,
}

/// Splits `file_name` into leftover and extension.
///
/// `"a.b.txt"` yields `("a.b", "txt")`. A name without a dot is all leftover.
pub fn split_extension(file_name: &str) -> FileNameParts<'_> {
    match file_name.rsplit_once('.') {
        Some((leftover, extension)) => FileNameParts {
            leftover,
            extension: (!extension.is_empty()).then_some(extension),
        },
        None => FileNameParts {
            leftover: file_name,
            extension: None,
        },
    }
}

/// Builds the stored filename `leftover + timestamp + "." + extension`.
pub fn timestamped_name(parts: &FileNameParts<'_>, timestamp: i64) -> String {
    match parts.extension {
        Some(extension) => format!("{}{timestamp}.{extension}", parts.leftover),
        None => format!("{}{timestamp}", parts.leftover),
    }
}

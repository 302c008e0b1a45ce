use std::collections::BTreeMap;

use crate::ConfigError;

/// MIME/extension policy and size limit enforced on every upload.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Limits {
    /// Maximum accepted file size in bytes; `0` only admits empty files.
    pub max_size: u64,
    /// Allowed uploads as `extension => mime/type` pairs.
    ///
    /// Several extensions may share a MIME type (`jpg` and `jpeg` for
    /// `image/jpeg`); an upload is accepted when its extension is any of them.
    pub allowed_extensions: BTreeMap<String, String>,
}

impl Limits {
    /// Creates an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an allowed `extension => mime` pair.
    pub fn allow(mut self, extension: impl Into<String>, mime: impl Into<String>) -> Self {
        self.allowed_extensions.insert(extension.into(), mime.into());
        self
    }

    /// Sets the maximum accepted size in bytes.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Returns every extension mapped to `mime`, in key order.
    pub fn extensions_for(&self, mime: &str) -> Vec<&str> {
        self.allowed_extensions
            .iter()
            .filter(|(_, allowed)| mime_eq(allowed, mime))
            .map(|(extension, _)| extension.as_str())
            .collect()
    }

    /// Checks that `mime` is allowed and that `extension` is one of the
    /// extensions configured for it.
    ///
    /// Returns the user-facing rejection message on failure.
    pub fn check_mime(&self, mime: &str, extension: Option<&str>) -> Result<(), String> {
        let expected = self.extensions_for(mime);
        if expected.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                mime = mime,
                allowed = ?self.allowed_extensions,
                "limits: MIME type not in policy"
            );
            return Err(format!("The file type, {mime}, is not allowed."));
        }

        let extension = extension.unwrap_or_default();
        if expected.iter().any(|candidate| *candidate == extension) {
            return Ok(());
        }

        Err(format!(
            "The file type, {mime}, should end in {}.",
            expected.join(" or ")
        ))
    }

    /// Checks `size` against the configured maximum.
    pub fn check_size(&self, size: u64) -> Result<(), String> {
        if size > self.max_size {
            return Err(format!(
                "The file cannot be saved because it is bigger than {} bytes.",
                self.max_size
            ));
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::EmptyMimePolicy);
        }

        for (extension, mime) in &self.allowed_extensions {
            if extension.contains(['.', '/', '\\']) {
                return Err(ConfigError::InvalidExtension {
                    extension: extension.clone(),
                });
            }
            if mime.parse::<mime::Mime>().is_err() {
                return Err(ConfigError::InvalidMimeType {
                    extension: extension.clone(),
                    mime: mime.clone(),
                });
            }
        }

        Ok(())
    }
}

fn mime_eq(allowed: &str, declared: &str) -> bool {
    match (allowed.parse::<mime::Mime>(), declared.parse::<mime::Mime>()) {
        (Ok(allowed), Ok(declared)) => allowed.essence_str() == declared.essence_str(),
        _ => allowed.eq_ignore_ascii_case(declared),
    }
}

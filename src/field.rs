use std::{collections::BTreeMap, path::PathBuf};

use crate::request::UploadRequest;

/// Values posted for one file input.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileField {
    /// Transport error code, `0` for none.
    pub error: i32,
    /// Declared MIME type.
    pub mime_type: String,
    /// Client filename.
    pub name: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Temporary path of the received bytes.
    pub temp_path: PathBuf,
}

impl FileField {
    /// Creates a field for a successfully transported file.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        temp_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            error: 0,
            mime_type: mime_type.into(),
            name: name.into(),
            size,
            temp_path: temp_path.into(),
        }
    }

    /// Creates a field that only carries a transport error code.
    pub fn failed(error: i32) -> Self {
        Self {
            error,
            ..Self::default()
        }
    }
}

/// Uploaded files of one request, grouped by form namespace and field name.
///
/// A form rendering `name="Tx_Gallery[photo]"` posts field `photo` under
/// namespace `Tx_Gallery`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostedFiles {
    namespaces: BTreeMap<String, BTreeMap<String, FileField>>,
}

impl PostedFiles {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the values posted for `namespace[field]`, replacing earlier ones.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        field: impl Into<String>,
        values: FileField,
    ) -> Option<FileField> {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(field.into(), values)
    }

    /// Returns the values posted for `namespace[field]`.
    pub fn get(&self, namespace: &str, field: &str) -> Option<&FileField> {
        self.namespaces.get(namespace)?.get(field)
    }

    /// Returns the namespaces that carried at least one file field.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Returns `true` when nothing was posted.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Extracts the upload request for `namespace[field]`.
    pub fn request(&self, namespace: &str, field: &str) -> Option<UploadRequest> {
        let values = self.get(namespace, field)?;
        Some(UploadRequest {
            namespace: namespace.to_owned(),
            field_name: field.to_owned(),
            error_code: values.error,
            mime_type: values.mime_type.clone(),
            original_filename: values.name.clone(),
            size: values.size,
            temp_path: values.temp_path.clone(),
        })
    }
}

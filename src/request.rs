use std::{fmt, path::PathBuf};

/// Raw parameters for one upload attempt.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadRequest {
    /// Form namespace the file input was posted under.
    pub namespace: String,
    /// Name of the file input inside the namespace.
    pub field_name: String,
    /// Transport error code reported by the upload layer, `0` for none.
    pub error_code: i32,
    /// MIME type declared by the client.
    pub mime_type: String,
    /// Filename supplied by the client.
    pub original_filename: String,
    /// Size declared by the client, in bytes.
    pub size: u64,
    /// Temporary file holding the uploaded bytes.
    pub temp_path: PathBuf,
}

impl UploadRequest {
    /// Creates a request for a successfully transported file.
    pub fn new(
        original_filename: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        temp_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            original_filename: original_filename.into(),
            mime_type: mime_type.into(),
            size,
            temp_path: temp_path.into(),
            ..Self::default()
        }
    }

    /// Sets the namespace and field name the file was posted under.
    pub fn with_field(mut self, namespace: impl Into<String>, field_name: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self.field_name = field_name.into();
        self
    }

    /// Sets the transport error code.
    pub fn with_error_code(mut self, error_code: i32) -> Self {
        self.error_code = error_code;
        self
    }

    /// Returns the transport error, if one was reported.
    pub fn transport_error(&self) -> Option<TransportError> {
        TransportError::from_code(self.error_code)
    }
}

/// Transport-level upload failure reported before the file reached us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Codes 1 and 2: the file exceeded a server or form size limit.
    TooBig(i32),
    /// Code 3: the body was cut off.
    Partial(i32),
    /// Code 4: the field was submitted without a file.
    NoFile(i32),
    /// Codes 5 to 7: temporary directory or write permissions are broken.
    ServerConfiguration(i32),
    /// Any other non-zero code.
    Unknown(i32),
}

impl TransportError {
    /// Maps a raw code to a transport error; `0` means no error.
    pub fn from_code(code: i32) -> Option<Self> {
        let error = match code {
            0 => return None,
            1 | 2 => Self::TooBig(code),
            3 => Self::Partial(code),
            4 => Self::NoFile(code),
            5..=7 => Self::ServerConfiguration(code),
            _ => Self::Unknown(code),
        };
        Some(error)
    }

    /// Returns the raw code.
    pub fn code(&self) -> i32 {
        match *self {
            Self::TooBig(code)
            | Self::Partial(code)
            | Self::NoFile(code)
            | Self::ServerConfiguration(code)
            | Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::TooBig(_) => "The file was not uploaded because it was too big.",
            Self::Partial(_) => "The file was only partially uploaded. Please try again.",
            Self::NoFile(_) => "No file was uploaded.",
            Self::ServerConfiguration(_) => {
                "The server configuration for uploading files is not correct. \
                 Check permissions and temporary folders."
            }
            Self::Unknown(_) => {
                "The file was not uploaded because of an unknown upload error."
            }
        };
        write!(f, "{reason} Upload error code: {}.", self.code())
    }
}

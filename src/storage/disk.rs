use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use uuid::Uuid;

use crate::{
    filename::{timestamped_name, FileNameParts},
    StorageError,
};

type CustomFilenameFn = dyn Fn(String) -> String + Send + Sync;

/// Strategy used to derive the stored filename.
#[derive(Clone, Default)]
pub enum FilenameStrategy {
    /// `leftover + unix timestamp + "." + extension`.
    #[default]
    Timestamped,
    /// Random UUID basename, keeping the client extension.
    Random,
    /// Transform applied to the timestamped name.
    Custom(Arc<CustomFilenameFn>),
}

impl FilenameStrategy {
    /// Creates a custom strategy from a transform of the timestamped name.
    pub fn custom<F>(transform: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(transform))
    }
}

impl fmt::Debug for FilenameStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamped => f.write_str("Timestamped"),
            Self::Random => f.write_str("Random"),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// Moves validated uploads into their destination directory.
#[derive(Debug, Clone, Default)]
pub struct DiskStorage {
    strategy: FilenameStrategy,
}

impl DiskStorage {
    /// Creates disk storage with the given naming strategy.
    pub fn new(strategy: FilenameStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the active naming strategy.
    pub fn strategy(&self) -> &FilenameStrategy {
        &self.strategy
    }

    /// Returns the sanitized filename for an upload received at `timestamp`.
    pub fn choose_output_name(&self, parts: &FileNameParts<'_>, timestamp: i64) -> String {
        let candidate = match &self.strategy {
            FilenameStrategy::Timestamped => timestamped_name(parts, timestamp),
            FilenameStrategy::Random => {
                let basename = Uuid::new_v4().simple().to_string();
                match parts.extension {
                    Some(extension) => format!("{basename}.{extension}"),
                    None => basename,
                }
            }
            FilenameStrategy::Custom(transform) => {
                transform(timestamped_name(parts, timestamp))
            }
        };

        sanitize_filename(&candidate)
    }

    /// Creates `directory` and its parents.
    ///
    /// A directory created concurrently by another upload counts as success.
    pub async fn ensure_directory(&self, directory: &Path) -> Result<(), StorageError> {
        if let Err(err) = tokio::fs::create_dir_all(directory).await {
            if tokio::fs::metadata(directory)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false)
            {
                return Ok(());
            }

            #[cfg(feature = "tracing")]
            tracing::error!(
                path = %directory.display(),
                error = %err,
                "disk storage: cannot create directory"
            );
            return Err(StorageError::new(format!(
                "cannot create directory for storing files `{}`: {err}",
                directory.display()
            )));
        }
        Ok(())
    }

    /// Moves `source` to `directory/file_name` and returns the final filename
    /// and path.
    ///
    /// The final name is claimed with a hard link, which fails instead of
    /// replacing an existing file. When the name is taken a random suffix is
    /// appended and the claim retried.
    pub async fn persist(
        &self,
        source: &Path,
        directory: &Path,
        file_name: &str,
    ) -> io::Result<(String, PathBuf)> {
        let mut candidate = file_name.to_owned();
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let target = directory.join(&candidate);
            match link_into_place(source, &target).await {
                Ok(()) => return Ok((candidate, target)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        path = %target.display(),
                        "disk storage: collision detected, adding suffix"
                    );
                    candidate = with_collision_suffix(file_name);
                }
                Err(err) => return Err(err),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free filename for `{file_name}` after {MAX_CLAIM_ATTEMPTS} attempts"),
        ))
    }
}

const MAX_CLAIM_ATTEMPTS: usize = 8;

/// Links `source` to `target` and drops the source name. Falls back to
/// [`copy_into_place`] when the link is refused, e.g. across filesystems.
async fn link_into_place(source: &Path, target: &Path) -> io::Result<()> {
    match tokio::fs::hard_link(source, target).await {
        Ok(()) => {
            remove_source(source).await;
            Ok(())
        }
        Err(err) if matches!(err.kind(), io::ErrorKind::AlreadyExists | io::ErrorKind::NotFound) => {
            Err(err)
        }
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                source = %source.display(),
                target = %target.display(),
                error = %_err,
                "disk storage: link refused, copying through staging file"
            );
            copy_into_place(source, target).await
        }
    }
}

/// Copies `source` into a staging file beside `target`, then links the
/// staging file to `target` and removes `source`.
///
/// `target` is never replaced and never observed half-written. The staging
/// file is removed whether or not placement succeeds; on failure `source` is
/// left untouched.
pub async fn copy_into_place(source: &Path, target: &Path) -> io::Result<()> {
    let staging = staging_path(target);
    let placed = async {
        tokio::fs::copy(source, &staging).await?;
        tokio::fs::hard_link(&staging, target).await
    }
    .await;
    let _ = tokio::fs::remove_file(&staging).await;
    placed?;

    remove_source(source).await;
    Ok(())
}

async fn remove_source(source: &Path) {
    if let Err(_err) = tokio::fs::remove_file(source).await {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            source = %source.display(),
            error = %_err,
            "disk storage: stored file but could not remove temporary upload"
        );
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or("file");
    target.with_file_name(format!(".{name}.{}.part", Uuid::new_v4().simple()))
}

fn with_collision_suffix(file_name: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => format!("{stem}-{suffix}.{ext}"),
        _ => format!("{file_name}-{suffix}"),
    }
}

/// Sanitizes filenames to prevent traversal and unsafe path characters.
pub fn sanitize_filename(input: &str) -> String {
    let base = input.rsplit(['/', '\\']).next().unwrap_or_default();

    let sanitized: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim_matches(['.', ' ']);
    if sanitized.is_empty() {
        return "file".to_owned();
    }

    sanitized.to_owned()
}

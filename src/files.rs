//! Backing File Store
//!
//! Locates requested files under the root directory and reads their bytes.
//! This is the expensive computation the cache memoizes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tracing::debug;

use crate::error::{Result, ServerError};

// == Find File ==
/// Searches `root` and all its subdirectories for a file named `file_name`.
///
/// Each directory's own files are checked before descending, and entries
/// are visited in sorted order, so the shallowest match wins and the result
/// is deterministic. Directory symlinks are not followed.
pub fn find_file(root: &Path, file_name: &str) -> io::Result<Option<PathBuf>> {
    let mut entries = fs::read_dir(root)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    let mut subdirs = Vec::new();
    for entry in entries {
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if entry.file_name() == file_name && entry.path().is_file() {
            return Ok(Some(entry.path()));
        }
    }

    for dir in subdirs {
        if let Some(found) = find_file(&dir, file_name)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

// == Load File ==
/// Finds and reads a file, keeping the blocking directory walk off the
/// async executor.
///
/// # Errors
/// - [`ServerError::NotFound`] when no file with that name exists
/// - [`ServerError::Io`] when the walk or the read fails
pub async fn load_file(root: &Path, file_name: &str) -> Result<Bytes> {
    let path = {
        let root = root.to_path_buf();
        let name = file_name.to_string();
        tokio::task::spawn_blocking(move || find_file(&root, &name))
            .await
            .map_err(|e| ServerError::Internal(format!("file search task failed: {}", e)))??
    };

    let path = path.ok_or_else(|| ServerError::NotFound(format!("File '{}' not found", file_name)))?;
    debug!(path = %path.display(), "Reading backing file");

    let bytes = tokio::fs::read(&path).await?;
    Ok(Bytes::from(bytes))
}

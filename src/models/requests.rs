//! Request parsing for the file server
//!
//! Turns a raw request path into a validated file request.

use std::ffi::OsStr;
use std::path::Path;

use crate::error::{Result, ServerError};

// == Image Kind ==
/// File types the server is willing to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Gif,
    Png,
}

impl ImageKind {
    /// Matches a file extension (without the dot). Case-sensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "gif" => Some(Self::Gif),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// MIME type sent in the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Png => "image/png",
        }
    }
}

/// A validated request for a single file (GET /*path)
///
/// # Fields
/// - `file_name`: last path segment; also the cache key
/// - `kind`: image type derived from the extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    /// Bare file name, no directories
    pub file_name: String,
    /// Image type
    pub kind: ImageKind,
}

impl FileRequest {
    /// Parses and validates a request path.
    ///
    /// Only the final segment is used; leading directories are ignored.
    ///
    /// # Errors
    /// - [`ServerError::BadRequest`] when the file name or extension is missing
    /// - [`ServerError::Forbidden`] when the extension is not `gif` or `png`
    pub fn parse(path: &str) -> Result<Self> {
        let file_name = path.rsplit('/').next().unwrap_or_default();
        if file_name.is_empty() {
            return Err(ServerError::BadRequest(
                "Request must name a file".to_string(),
            ));
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(OsStr::to_str)
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| {
                ServerError::BadRequest(format!("File '{}' has no extension", file_name))
            })?;

        let kind = ImageKind::from_extension(extension).ok_or_else(|| {
            ServerError::Forbidden(format!("File type '.{}' is not served", extension))
        })?;

        Ok(Self {
            file_name: file_name.to_string(),
            kind,
        })
    }
}

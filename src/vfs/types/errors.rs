/*!
 * VFS Error Types
 * Structured, type-safe error handling for filesystem operations
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use thiserror::Error;

/// VFS operation result
///
/// # Must Use
/// VFS operations can fail and must be handled to prevent data loss
#[must_use = "VFS operations can fail and must be handled"]
pub type VfsResult<T> = Result<T, VfsError>;

/// VFS errors with structured, type-safe error handling
///
/// All error variants include context strings that should be non-empty.
/// Serialization uses tagged enum pattern for type safety.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum VfsError {
    #[error("Not found: {0}")]
    NotFound(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Already exists: {0}")]
    AlreadyExists(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Permission denied: {0}")]
    PermissionDenied(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Not a directory: {0}")]
    NotADirectory(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Is a directory: {0}")]
    IsADirectory(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Invalid path: {0}")]
    InvalidPath(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("I/O error: {0}")]
    IoError(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Not supported: {0}")]
    NotSupported(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Out of space")]
    OutOfSpace,

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Read-only filesystem")]
    ReadOnly,

    /// Operation on a handle after `close`
    #[error("File already closed: {0}")]
    Closed(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    /// A limited directory listing found no further entries
    #[error("End of directory")]
    EndOfDirectory,
}

impl VfsError {
    /// Convert std::io::Error to VfsError, keeping the context
    pub fn from_io(e: io::Error, context: impl Into<String>) -> Self {
        // Errors that already carry a VfsError (see From below) unwrap losslessly
        if let Some(inner) = e.get_ref().and_then(|i| i.downcast_ref::<VfsError>()) {
            return inner.clone();
        }
        match e.kind() {
            io::ErrorKind::NotFound => VfsError::NotFound(context.into()),
            io::ErrorKind::PermissionDenied => VfsError::PermissionDenied(context.into()),
            io::ErrorKind::AlreadyExists => VfsError::AlreadyExists(context.into()),
            _ => VfsError::IoError(format!("{}: {}", context.into(), e)),
        }
    }

    /// Check whether this is the end-of-listing signal
    #[inline]
    #[must_use]
    pub const fn is_end_of_directory(&self) -> bool {
        matches!(self, VfsError::EndOfDirectory)
    }
}

impl From<VfsError> for io::Error {
    fn from(e: VfsError) -> Self {
        let kind = match &e {
            VfsError::NotFound(_) => io::ErrorKind::NotFound,
            VfsError::AlreadyExists(_) => io::ErrorKind::AlreadyExists,
            VfsError::PermissionDenied(_) | VfsError::ReadOnly => io::ErrorKind::PermissionDenied,
            VfsError::InvalidPath(_) | VfsError::InvalidArgument(_) => io::ErrorKind::InvalidInput,
            VfsError::NotSupported(_) => io::ErrorKind::Unsupported,
            VfsError::EndOfDirectory => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, e)
    }
}

/// Deserialize and validate non-empty string for error messages
pub(super) fn deserialize_nonempty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("error message must not be empty"));
    }
    Ok(s)
}

/*!
 * VFS Traits
 * Core filesystem abstraction traits implemented by every backend
 */

use std::io::{Read, Write};
use std::path::Path;

use super::types::*;

/// Virtual filesystem trait
///
/// All backends implement this trait. Paths are interpreted relative to the
/// backend's own root; a leading `/` is optional.
pub trait FileSystem: Send + Sync {
    /// Read entire file contents
    fn read(&self, path: &Path) -> VfsResult<Vec<u8>>;

    /// Write entire file contents (create or overwrite)
    fn write(&self, path: &Path, data: &[u8]) -> VfsResult<()>;

    /// Delete file
    fn delete(&self, path: &Path) -> VfsResult<()>;

    /// Check if file/directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Get file metadata
    fn metadata(&self, path: &Path) -> VfsResult<Metadata>;

    /// Create directory (including parents)
    fn create_dir(&self, path: &Path) -> VfsResult<()>;

    /// Remove directory (must be empty)
    fn remove_dir(&self, path: &Path) -> VfsResult<()>;

    /// Open file or directory with specified flags and mode
    fn open(&self, path: &Path, flags: OpenFlags, mode: OpenMode) -> VfsResult<Box<dyn OpenFile>>;

    /// Get filesystem name/type
    fn name(&self) -> &str;

    /// Check if filesystem is read-only
    fn readonly(&self) -> bool {
        false
    }
}

/// Open file handle trait
///
/// A handle owns an implicit cursor: reads advance through file bytes and
/// `readdir` advances through directory children. After `close` every
/// operation fails with [`VfsError::Closed`].
pub trait OpenFile: Read + Write + Send {
    /// Get metadata of the opened object
    fn metadata(&self) -> VfsResult<Metadata>;

    /// List directory children from the current cursor position
    ///
    /// Raw listings may include the `.` and `..` pseudo-entries.
    /// - `n <= 0`: all remaining entries; an exhausted cursor yields an empty vector
    /// - `n > 0`: at most `n` entries; an exhausted cursor yields [`VfsError::EndOfDirectory`]
    fn readdir(&mut self, n: isize) -> VfsResult<Vec<Metadata>>;

    /// Flush pending writes and release the handle
    fn close(&mut self) -> VfsResult<()>;
}

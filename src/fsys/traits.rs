/*!
 * Standard Filesystem Traits
 * Read-only interface that consumers (walkers, globbers, applications) program against
 */

use std::io::Read;

use crate::vfs::{FileType, Metadata, VfsResult};

/// One child of a directory listing
///
/// Every accessor projects the record captured when the listing was taken.
pub trait FsDirEntry {
    /// Base name of the child
    fn name(&self) -> &str;

    /// Whether the child is a directory
    fn is_dir(&self) -> bool;

    /// Type classification of the child
    fn file_type(&self) -> FileType;

    /// Full stat record captured at listing time
    fn info(&self) -> &Metadata;
}

/// An open, readable file
///
/// Reads follow `std::io::Read`: a cursor advances across calls and end of
/// stream is `Ok(0)`.
pub trait FsFile: Read {
    /// Stat the open file
    fn stat(&self) -> VfsResult<Metadata>;

    /// Release the file; later reads and listings fail
    fn close(&mut self) -> VfsResult<()>;
}

/// An open file that can list directory children
pub trait ReadDirFile: FsFile {
    type Entry: FsDirEntry;

    /// Read the next batch of children
    ///
    /// - `n <= 0`: every remaining child in one call
    /// - `n > 0`: at most `n` children; once exhausted the call fails with
    ///   [`VfsError::EndOfDirectory`](crate::vfs::VfsError::EndOfDirectory)
    ///
    /// `.` and `..` are never returned.
    fn read_dir(&mut self, n: isize) -> VfsResult<Vec<Self::Entry>>;
}

/// A filesystem that opens named files
///
/// Names follow [`valid_path`](super::valid_path) rules.
pub trait OpenFs {
    type File: FsFile;

    fn open(&self, name: &str) -> VfsResult<Self::File>;
}

/// A filesystem that reads whole files by name
pub trait ReadFileFs: OpenFs {
    fn read_file(&self, name: &str) -> VfsResult<Vec<u8>>;
}

/// A filesystem that lists whole directories by name
pub trait ReadDirFs: OpenFs {
    type Entry: FsDirEntry;

    fn read_dir(&self, name: &str) -> VfsResult<Vec<Self::Entry>>;
}

/// A filesystem that stats files by name
pub trait StatFs: OpenFs {
    fn stat(&self, name: &str) -> VfsResult<Metadata>;
}

/// A filesystem that can be narrowed to one of its subdirectories
pub trait SubFs: OpenFs {
    type Sub: OpenFs;

    fn sub(&self, dir: &str) -> VfsResult<Self::Sub>;
}

/*!
 * File Handle Implementation
 * In-memory handle for file bytes or a directory listing cursor
 */

use std::collections::VecDeque;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use super::super::traits::{FileSystem, OpenFile};
use super::super::types::*;
use super::MemFS;

/// Per-handle cursor state
pub(super) enum HandleState {
    File {
        cursor: Cursor<Vec<u8>>,
        dirty: bool,
    },
    /// Snapshot of the raw listing taken at open, consumed front to back
    Directory { remaining: VecDeque<Metadata> },
    Closed,
}

/// In-memory file handle
///
/// Written bytes are buffered in the handle and committed to the tree on
/// `close` (or on drop when the caller forgets to close).
pub(super) struct MemFile {
    pub fs: MemFS,
    pub path: PathBuf,
    pub flags: OpenFlags,
    pub state: HandleState,
}

impl MemFile {
    fn closed_error(&self) -> VfsError {
        VfsError::Closed(self.path.display().to_string())
    }

    fn commit(&mut self) -> VfsResult<()> {
        if let HandleState::File { cursor, dirty } = &mut self.state {
            if *dirty {
                self.fs.write_impl(&self.path, cursor.get_ref())?;
                *dirty = false;
            }
        }
        Ok(())
    }
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.state {
            HandleState::File { cursor, .. } => {
                if !self.flags.read {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        "file not opened for reading",
                    ));
                }
                cursor.read(buf)
            }
            HandleState::Directory { .. } => {
                Err(VfsError::IsADirectory(self.path.display().to_string()).into())
            }
            HandleState::Closed => Err(self.closed_error().into()),
        }
    }
}

impl Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.state {
            HandleState::File { cursor, dirty } => {
                if !self.flags.is_writable() {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        "file not opened for writing",
                    ));
                }
                if self.flags.append {
                    cursor.seek(SeekFrom::End(0))?;
                }
                let written = cursor.write(buf)?;
                *dirty = true;
                Ok(written)
            }
            HandleState::Directory { .. } => {
                Err(VfsError::IsADirectory(self.path.display().to_string()).into())
            }
            HandleState::Closed => Err(self.closed_error().into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if matches!(self.state, HandleState::Closed) {
            return Err(self.closed_error().into());
        }
        self.commit().map_err(io::Error::from)
    }
}

impl OpenFile for MemFile {
    fn metadata(&self) -> VfsResult<Metadata> {
        let mut metadata = match &self.state {
            HandleState::Closed => return Err(self.closed_error()),
            _ => self.fs.metadata(&self.path)?,
        };
        // Uncommitted writes are visible through the handle
        if let HandleState::File { cursor, .. } = &self.state {
            metadata.size = cursor.get_ref().len() as u64;
        }
        Ok(metadata)
    }

    fn readdir(&mut self, n: isize) -> VfsResult<Vec<Metadata>> {
        match &mut self.state {
            HandleState::Directory { remaining } => {
                if n <= 0 {
                    return Ok(remaining.drain(..).collect());
                }
                if remaining.is_empty() {
                    return Err(VfsError::EndOfDirectory);
                }
                let take = remaining.len().min(n as usize);
                Ok(remaining.drain(..take).collect())
            }
            HandleState::File { .. } => Err(VfsError::NotADirectory(self.path.display().to_string())),
            HandleState::Closed => Err(self.closed_error()),
        }
    }

    fn close(&mut self) -> VfsResult<()> {
        if matches!(self.state, HandleState::Closed) {
            return Err(self.closed_error());
        }
        let result = self.commit();
        self.state = HandleState::Closed;
        result
    }
}

impl Drop for MemFile {
    fn drop(&mut self) {
        // Commit on drop if the caller never closed
        let _ = self.commit();
    }
}

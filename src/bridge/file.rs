/*!
 * Bridge File
 * Standard file view over one open VFS handle
 */

use std::fmt;
use std::io::{self, Read};

use super::entry::BridgeDirEntry;
use super::listing;
use crate::fsys::{FsFile, ReadDirFile};
use crate::vfs::{Metadata, OpenFile, VfsResult};

/// An open file or directory reached through [`BridgeFs`](super::BridgeFs)
///
/// Every call forwards to the underlying handle. After `close` reads and
/// listings fail with whatever the handle reports for a closed state.
pub struct BridgeFile {
    inner: Box<dyn OpenFile>,
}

impl BridgeFile {
    pub(crate) fn new(inner: Box<dyn OpenFile>) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for BridgeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeFile").finish_non_exhaustive()
    }
}

impl Read for BridgeFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl FsFile for BridgeFile {
    fn stat(&self) -> VfsResult<Metadata> {
        self.inner.metadata()
    }

    fn close(&mut self) -> VfsResult<()> {
        self.inner.close()
    }
}

impl ReadDirFile for BridgeFile {
    type Entry = BridgeDirEntry;

    fn read_dir(&mut self, n: isize) -> VfsResult<Vec<BridgeDirEntry>> {
        if n <= 0 {
            listing::read_all(self.inner.as_mut())
        } else {
            listing::read_limited(self.inner.as_mut(), n as usize)
        }
    }
}

/*!
 * Bridge Filesystem
 * Standard read-only filesystem view over any VFS backend
 */

use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::trace;

use super::entry::BridgeDirEntry;
use super::file::BridgeFile;
use crate::fsys::{
    valid_path, FsFile, OpenFs, ReadDirFile, ReadDirFs, ReadFileFs, StatFs, SubFs, ROOT,
};
use crate::vfs::{FileSystem, Metadata, OpenFlags, OpenMode, VfsError, VfsResult};

/// Read-only adapter from a [`FileSystem`] to the `fsys` traits
///
/// Cloning shares the same backend. Names are handed to the backend as-is
/// (relative to the backend root) unless the view was narrowed with
/// [`SubFs::sub`], in which case names must be valid paths and resolve under
/// the sub-root.
#[derive(Clone)]
pub struct BridgeFs {
    fs: Arc<dyn FileSystem>,
    root: Option<PathBuf>,
}

impl BridgeFs {
    /// Wrap a backend
    pub fn new<F: FileSystem + 'static>(fs: F) -> Self {
        Self::from_arc(Arc::new(fs))
    }

    /// Wrap a backend that is already shared
    pub fn from_arc(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs, root: None }
    }

    /// Backend path a standard name resolves to
    fn resolve(&self, name: &str) -> VfsResult<PathBuf> {
        let Some(root) = &self.root else {
            return Ok(PathBuf::from(name));
        };
        if !valid_path(name) {
            return Err(VfsError::InvalidPath(name.to_string()));
        }
        Ok(match name {
            ROOT => root.clone(),
            _ => root.join(name),
        })
    }

    /// Open `name`, run `op` on the handle, and close it on every path
    ///
    /// An `op` error wins over a close error; a close error replaces an `op`
    /// success.
    fn with_file<T>(
        &self,
        name: &str,
        op: impl FnOnce(&mut BridgeFile) -> VfsResult<T>,
    ) -> VfsResult<T> {
        let mut file = self.open(name)?;
        let result = op(&mut file);
        let closed = file.close();

        match (result, closed) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => {
                trace!(file = name, error = %e, "close failed after successful operation");
                Err(e)
            }
            (Ok(value), Ok(())) => Ok(value),
        }
    }
}

impl fmt::Debug for BridgeFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeFs")
            .field("backend", &self.fs.name())
            .field("root", &self.root)
            .finish()
    }
}

impl OpenFs for BridgeFs {
    type File = BridgeFile;

    fn open(&self, name: &str) -> VfsResult<BridgeFile> {
        let path = self.resolve(name)?;
        trace!(file = name, path = %path.display(), "bridge open");

        self.fs
            .open(&path, OpenFlags::read_only(), OpenMode::default())
            .map(BridgeFile::new)
    }
}

impl ReadFileFs for BridgeFs {
    fn read_file(&self, name: &str) -> VfsResult<Vec<u8>> {
        self.with_file(name, |file| {
            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .map_err(|e| VfsError::from_io(e, name))?;
            Ok(data)
        })
    }
}

impl ReadDirFs for BridgeFs {
    type Entry = BridgeDirEntry;

    fn read_dir(&self, name: &str) -> VfsResult<Vec<BridgeDirEntry>> {
        self.with_file(name, |file| file.read_dir(0))
    }
}

impl StatFs for BridgeFs {
    fn stat(&self, name: &str) -> VfsResult<Metadata> {
        let path = self.resolve(name)?;
        self.fs.metadata(&path)
    }
}

impl SubFs for BridgeFs {
    type Sub = BridgeFs;

    fn sub(&self, dir: &str) -> VfsResult<BridgeFs> {
        if !valid_path(dir) {
            return Err(VfsError::InvalidPath(format!("sub {}", dir)));
        }
        if dir == ROOT {
            return Ok(self.clone());
        }

        let root = match &self.root {
            Some(root) => root.join(dir),
            None => PathBuf::from(dir),
        };
        trace!(dir, root = %root.display(), "bridge sub");

        Ok(Self {
            fs: Arc::clone(&self.fs),
            root: Some(root),
        })
    }
}

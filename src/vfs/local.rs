/*!
 * Local Filesystem Backend
 * Wraps std::fs for host filesystem access below a root directory
 */

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use tracing::trace;

use super::traits::{FileSystem, OpenFile};
use super::types::*;

/// Local filesystem implementation using std::fs
///
/// Raw listings come straight from `std::fs::read_dir`, which never reports
/// the `.` and `..` pseudo-entries.
#[derive(Debug, Clone)]
pub struct LocalFS {
    root: PathBuf,
    readonly: bool,
}

impl LocalFS {
    /// Create new local filesystem rooted at specified path
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            readonly: false,
        }
    }

    /// Create read-only local filesystem
    pub fn readonly<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            readonly: true,
        }
    }

    /// Host directory this filesystem is rooted at
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve path relative to root
    ///
    /// Components are processed manually so `..` can never climb above the
    /// root, for existing and non-existing paths alike.
    fn resolve(&self, path: &Path) -> PathBuf {
        let mut components = Vec::with_capacity(8);

        for component in path.components() {
            match component {
                Component::Normal(name) => components.push(name),
                Component::ParentDir => {
                    components.pop();
                }
                // RootDir, CurDir and Windows prefixes carry no location below root
                _ => {}
            }
        }

        let mut result = self.root.clone();
        for component in components {
            result.push(component);
        }
        result
    }

    /// Check write permission
    fn check_write(&self) -> VfsResult<()> {
        if self.readonly {
            return Err(VfsError::ReadOnly);
        }
        Ok(())
    }

    /// Convert std::fs::FileType to VFS FileType
    fn convert_file_type(ft: fs::FileType) -> FileType {
        if ft.is_dir() {
            FileType::Directory
        } else if ft.is_symlink() {
            FileType::Symlink
        } else if ft.is_file() {
            FileType::File
        } else {
            Self::convert_special_type(ft)
        }
    }

    #[cfg(unix)]
    fn convert_special_type(ft: fs::FileType) -> FileType {
        use std::os::unix::fs::FileTypeExt;

        if ft.is_block_device() {
            FileType::BlockDevice
        } else if ft.is_char_device() {
            FileType::CharDevice
        } else if ft.is_fifo() {
            FileType::Fifo
        } else if ft.is_socket() {
            FileType::Socket
        } else {
            FileType::Unknown
        }
    }

    #[cfg(not(unix))]
    fn convert_special_type(_ft: fs::FileType) -> FileType {
        FileType::Unknown
    }

    /// Convert std::fs::Metadata to VFS Metadata
    fn convert_metadata(md: fs::Metadata, name: String) -> Metadata {
        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;
            md.permissions().mode()
        };
        #[cfg(not(unix))]
        let mode = if md.permissions().readonly() {
            0o444
        } else {
            0o644
        };

        Metadata {
            name,
            file_type: Self::convert_file_type(md.file_type()),
            size: if md.is_dir() { 0 } else { md.len() },
            permissions: Permissions::new(mode),
            modified: md.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            accessed: md.accessed().unwrap_or(SystemTime::UNIX_EPOCH),
            created: md.created().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }

    /// Base name of a resolved host path
    fn name_of(full_path: &Path) -> String {
        full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "/".to_string())
    }
}

impl FileSystem for LocalFS {
    fn read(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| VfsError::from_io(e, format!("read {}", path.display())))
    }

    fn write(&self, path: &Path, data: &[u8]) -> VfsResult<()> {
        self.check_write()?;
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VfsError::from_io(e, format!("create parent dirs for {}", path.display()))
            })?;
        }

        fs::write(&full_path, data)
            .map_err(|e| VfsError::from_io(e, format!("write {}", path.display())))
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        self.check_write()?;
        let full_path = self.resolve(path);
        fs::remove_file(&full_path)
            .map_err(|e| VfsError::from_io(e, format!("delete {}", path.display())))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn metadata(&self, path: &Path) -> VfsResult<Metadata> {
        let full_path = self.resolve(path);
        let md = fs::metadata(&full_path)
            .map_err(|e| VfsError::from_io(e, format!("metadata {}", path.display())))?;
        Ok(Self::convert_metadata(md, Self::name_of(&full_path)))
    }

    fn create_dir(&self, path: &Path) -> VfsResult<()> {
        self.check_write()?;
        let full_path = self.resolve(path);
        fs::create_dir_all(&full_path)
            .map_err(|e| VfsError::from_io(e, format!("create_dir {}", path.display())))
    }

    fn remove_dir(&self, path: &Path) -> VfsResult<()> {
        self.check_write()?;
        let full_path = self.resolve(path);
        fs::remove_dir(&full_path)
            .map_err(|e| VfsError::from_io(e, format!("remove_dir {}", path.display())))
    }

    fn open(&self, path: &Path, flags: OpenFlags, _mode: OpenMode) -> VfsResult<Box<dyn OpenFile>> {
        flags.validate()?;
        if flags.is_writable() {
            self.check_write()?;
        }

        let full_path = self.resolve(path);
        let display = path.display().to_string();
        trace!(path = %full_path.display(), ?flags, "localfs open");

        if full_path.is_dir() {
            if flags.is_writable() {
                return Err(VfsError::IsADirectory(display));
            }
            let entries = fs::read_dir(&full_path)
                .map_err(|e| VfsError::from_io(e, format!("open {}", display)))?;
            return Ok(Box::new(LocalFile {
                full_path,
                display,
                state: LocalHandle::Directory(entries),
            }));
        }

        let file = fs::OpenOptions::new()
            .read(flags.read)
            .write(flags.write)
            .append(flags.append)
            .truncate(flags.truncate)
            .create(flags.create)
            .create_new(flags.create_new)
            .open(&full_path)
            .map_err(|e| VfsError::from_io(e, format!("open {}", display)))?;

        Ok(Box::new(LocalFile {
            full_path,
            display,
            state: LocalHandle::File(file),
        }))
    }

    fn name(&self) -> &str {
        "local"
    }

    fn readonly(&self) -> bool {
        self.readonly
    }
}

enum LocalHandle {
    File(fs::File),
    /// Live `read_dir` iterator; pulling from it advances the cursor
    Directory(fs::ReadDir),
    Closed,
}

/// Local file handle
struct LocalFile {
    full_path: PathBuf,
    display: String,
    state: LocalHandle,
}

impl LocalFile {
    fn closed_error(&self) -> VfsError {
        VfsError::Closed(self.display.clone())
    }

    fn next_entry(&mut self) -> Option<VfsResult<Metadata>> {
        let LocalHandle::Directory(entries) = &mut self.state else {
            return None;
        };
        let entry = entries.next()?;
        Some(
            entry
                .and_then(|entry| {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    entry
                        .metadata()
                        .map(|md| LocalFS::convert_metadata(md, name))
                })
                .map_err(|e| VfsError::from_io(e, format!("readdir {}", self.display))),
        )
    }
}

impl Read for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.state {
            LocalHandle::File(file) => file.read(buf),
            LocalHandle::Directory(_) => Err(VfsError::IsADirectory(self.display.clone()).into()),
            LocalHandle::Closed => Err(self.closed_error().into()),
        }
    }
}

impl Write for LocalFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.state {
            LocalHandle::File(file) => file.write(buf),
            LocalHandle::Directory(_) => Err(VfsError::IsADirectory(self.display.clone()).into()),
            LocalHandle::Closed => Err(self.closed_error().into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.state {
            LocalHandle::File(file) => file.flush(),
            LocalHandle::Directory(_) => Ok(()),
            LocalHandle::Closed => Err(self.closed_error().into()),
        }
    }
}

impl OpenFile for LocalFile {
    fn metadata(&self) -> VfsResult<Metadata> {
        let md = match &self.state {
            LocalHandle::File(file) => file.metadata(),
            LocalHandle::Directory(_) => fs::metadata(&self.full_path),
            LocalHandle::Closed => return Err(self.closed_error()),
        }
        .map_err(|e| VfsError::from_io(e, format!("metadata {}", self.display)))?;
        Ok(LocalFS::convert_metadata(md, LocalFS::name_of(&self.full_path)))
    }

    fn readdir(&mut self, n: isize) -> VfsResult<Vec<Metadata>> {
        match self.state {
            LocalHandle::Directory(_) => {}
            LocalHandle::File(_) => return Err(VfsError::NotADirectory(self.display.clone())),
            LocalHandle::Closed => return Err(self.closed_error()),
        }

        let limit = if n > 0 { n as usize } else { usize::MAX };
        let mut entries = Vec::new();
        while entries.len() < limit {
            match self.next_entry() {
                Some(entry) => entries.push(entry?),
                None => break,
            }
        }

        if n > 0 && entries.is_empty() {
            return Err(VfsError::EndOfDirectory);
        }
        Ok(entries)
    }

    fn close(&mut self) -> VfsResult<()> {
        match std::mem::replace(&mut self.state, LocalHandle::Closed) {
            LocalHandle::File(mut file) => file
                .flush()
                .map_err(|e| VfsError::from_io(e, format!("close {}", self.display))),
            LocalHandle::Directory(_) => Ok(()),
            LocalHandle::Closed => Err(self.closed_error()),
        }
    }
}

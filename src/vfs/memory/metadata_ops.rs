/*!
 * FileSystem Trait Implementation
 * Stat, open and dispatch to the file/directory operation modules
 */

use std::collections::VecDeque;
use std::io::Cursor;
use std::path::Path;

use tracing::trace;

use super::super::traits::{FileSystem, OpenFile};
use super::super::types::*;
use super::file_handle::{HandleState, MemFile};
use super::node::Node;
use super::MemFS;

impl FileSystem for MemFS {
    fn read(&self, path: &Path) -> VfsResult<Vec<u8>> {
        self.read_impl(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> VfsResult<()> {
        self.write_impl(path, data)
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        self.delete_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize(path);
        self.nodes.contains_key(&path)
    }

    fn metadata(&self, path: &Path) -> VfsResult<Metadata> {
        let path = self.normalize(path);
        let name = self.entry_name(&path);

        self.nodes
            .get(&path)
            .map(|node| node.metadata(name))
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))
    }

    fn create_dir(&self, path: &Path) -> VfsResult<()> {
        self.create_dir_impl(path)
    }

    fn remove_dir(&self, path: &Path) -> VfsResult<()> {
        self.remove_dir_impl(path)
    }

    fn open(&self, path: &Path, flags: OpenFlags, mode: OpenMode) -> VfsResult<Box<dyn OpenFile>> {
        flags.validate()?;
        let path = self.normalize(path);
        trace!(path = %path.display(), ?flags, "memfs open");

        let existing = self.nodes.get(&path).map(|node| node.value().clone());
        let state = match existing {
            Some(Node::Directory { .. }) => {
                if flags.is_writable() {
                    return Err(VfsError::IsADirectory(path.display().to_string()));
                }
                HandleState::Directory {
                    remaining: VecDeque::from(self.list_raw(&path)?),
                }
            }
            Some(Node::File { data, .. }) => {
                if flags.create_new {
                    return Err(VfsError::AlreadyExists(path.display().to_string()));
                }
                let data = if flags.truncate { Vec::new() } else { data };
                HandleState::File {
                    cursor: Cursor::new(data),
                    dirty: flags.truncate,
                }
            }
            None => {
                if !flags.will_create() {
                    return Err(VfsError::NotFound(path.display().to_string()));
                }
                self.write_impl(&path, &[])?;
                if let Some(mut node) = self.nodes.get_mut(&path) {
                    if let Node::File { permissions, .. } = node.value_mut() {
                        *permissions = mode.permissions;
                    }
                }
                HandleState::File {
                    cursor: Cursor::new(Vec::new()),
                    dirty: false,
                }
            }
        };

        Ok(Box::new(MemFile {
            fs: self.clone(),
            path,
            flags,
            state,
        }))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/*!
 * File Operations Implementation
 * Whole-file read, write and delete
 */

use std::path::Path;
use std::time::SystemTime;

use tracing::debug;

use super::super::types::*;
use super::node::Node;
use super::MemFS;

impl MemFS {
    pub(super) fn read_impl(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let path = self.normalize(path);

        match self.nodes.get(&path).as_deref() {
            Some(Node::File { data, .. }) => Ok(data.clone()),
            Some(Node::Directory { .. }) => Err(VfsError::IsADirectory(path.display().to_string())),
            None => Err(VfsError::NotFound(path.display().to_string())),
        }
    }

    pub(super) fn write_impl(&self, path: &Path, data: &[u8]) -> VfsResult<()> {
        let path = self.normalize(path);
        let _tree = self.tree_lock.lock();
        self.ensure_parent(&path)?;

        // Existing node decides how much extra space is needed
        let existing = self.nodes.get(&path).map(|node| match node.value() {
            Node::File {
                data: old_data,
                created,
                permissions,
                ..
            } => Ok((old_data.len(), *created, *permissions)),
            Node::Directory { .. } => Err(VfsError::IsADirectory(path.display().to_string())),
        });

        let now = SystemTime::now();
        let (old_size, created, permissions, is_new) = match existing {
            Some(found) => {
                let (old_size, created, permissions) = found?;
                (old_size, created, permissions, false)
            }
            None => (0, now, Permissions::readwrite(), true),
        };

        if data.len() > old_size {
            self.check_and_reserve_space(data.len() - old_size)?;
        }

        if is_new {
            if let Some(parent) = self.parent_path(&path) {
                let file_name = self.file_name(&path)?;
                if let Err(e) = self.add_child(&parent, &file_name, &path) {
                    if data.len() > old_size {
                        self.release_space(data.len() - old_size);
                    }
                    return Err(e);
                }
            }
        }

        self.nodes.insert(
            path.clone(),
            Node::File {
                data: data.to_vec(),
                permissions,
                modified: now,
                created,
            },
        );

        if old_size > data.len() {
            self.release_space(old_size - data.len());
        }

        debug!(path = %path.display(), bytes = data.len(), "memfs write");
        Ok(())
    }

    pub(super) fn delete_impl(&self, path: &Path) -> VfsResult<()> {
        let path = self.normalize(path);
        let _tree = self.tree_lock.lock();

        let size = match self.nodes.get(&path).as_deref() {
            Some(Node::File { data, .. }) => data.len(),
            Some(Node::Directory { .. }) => {
                return Err(VfsError::IsADirectory(path.display().to_string()))
            }
            None => return Err(VfsError::NotFound(path.display().to_string())),
        };

        self.nodes.remove(&path);
        if let Some(parent) = self.parent_path(&path) {
            let file_name = self.file_name(&path)?;
            self.remove_child(&parent, &file_name)?;
        }
        self.release_space(size);

        debug!(path = %path.display(), "memfs delete");
        Ok(())
    }
}

/*!
 * Directory Operations Implementation
 * Directory creation, removal and raw listings
 */

use std::path::{Path, PathBuf};

use tracing::debug;

use super::super::types::*;
use super::node::Node;
use super::MemFS;

impl MemFS {
    /// Raw listing: `.` and `..` first, then children in name order
    pub(super) fn list_raw(&self, path: &Path) -> VfsResult<Vec<Metadata>> {
        let path = self.normalize(path);

        let (own, children) = match self.nodes.get(&path).as_deref() {
            Some(node) => match node {
                Node::Directory { children, .. } => (node.metadata(SELF_ENTRY), children.clone()),
                Node::File { .. } => {
                    return Err(VfsError::NotADirectory(path.display().to_string()))
                }
            },
            None => return Err(VfsError::NotFound(path.display().to_string())),
        };

        // The root is its own parent
        let parent = match self.parent_path(&path) {
            Some(parent) => self
                .nodes
                .get(&parent)
                .map(|node| node.metadata(PARENT_ENTRY))
                .unwrap_or_else(|| own.clone().renamed(PARENT_ENTRY)),
            None => own.clone().renamed(PARENT_ENTRY),
        };

        let mut entries = Vec::with_capacity(children.len() + 2);
        entries.push(own);
        entries.push(parent);
        for (name, child_path) in children {
            if let Some(node) = self.nodes.get(&child_path) {
                entries.push(node.metadata(name));
            }
        }
        Ok(entries)
    }

    pub(super) fn create_dir_impl(&self, path: &Path) -> VfsResult<()> {
        let path = self.normalize(path);
        let _tree = self.tree_lock.lock();

        // Create parent directories if needed
        let mut current = PathBuf::from("/");
        for component in path.components().skip(1) {
            current.push(component);

            let existing = self.nodes.get(&current).map(|node| node.is_dir());
            match existing {
                Some(true) => continue,
                Some(false) => {
                    return Err(VfsError::NotADirectory(current.display().to_string()))
                }
                None => {}
            }

            let parent = current
                .parent()
                .ok_or_else(|| VfsError::InvalidPath("path has no parent".to_string()))?
                .to_path_buf();
            let name = self.file_name(&current)?;

            self.nodes.insert(current.clone(), Node::empty_dir());
            self.add_child(&parent, &name, &current)?;
        }

        debug!(path = %path.display(), "memfs create_dir");
        Ok(())
    }

    pub(super) fn remove_dir_impl(&self, path: &Path) -> VfsResult<()> {
        let path = self.normalize(path);
        let _tree = self.tree_lock.lock();

        match self.nodes.get(&path).as_deref() {
            Some(Node::Directory { children, .. }) => {
                if !children.is_empty() {
                    return Err(VfsError::InvalidArgument(format!(
                        "directory not empty: {}",
                        path.display()
                    )));
                }
            }
            Some(Node::File { .. }) => {
                return Err(VfsError::NotADirectory(path.display().to_string()))
            }
            None => return Err(VfsError::NotFound(path.display().to_string())),
        }

        let Some(parent) = self.parent_path(&path) else {
            return Err(VfsError::InvalidArgument("cannot remove root".to_string()));
        };

        self.nodes.remove(&path);
        let dir_name = self.file_name(&path)?;
        self.remove_child(&parent, &dir_name)?;

        debug!(path = %path.display(), "memfs remove_dir");
        Ok(())
    }
}

/*!
 * In-Memory Filesystem Backend
 * Fast, volatile filesystem for testing and temporary storage
 *
 * Raw directory listings from this backend include the `.` and `..`
 * pseudo-entries ahead of the real children, the way POSIX `readdir` does.
 */

mod dir_ops;
mod file_handle;
mod file_ops;
mod metadata_ops;
mod node;

use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::types::*;
use node::Node;

/// In-memory filesystem implementation
///
/// Cloning is cheap and yields a second handle onto the same tree.
#[derive(Debug, Clone)]
pub struct MemFS {
    pub(super) nodes: Arc<DashMap<PathBuf, Node, RandomState>>,
    pub(super) max_size: Option<usize>,
    pub(super) current_size: Arc<AtomicUsize>,
    /// Serializes structural changes (node insert/remove plus parent links)
    pub(super) tree_lock: Arc<Mutex<()>>,
}

impl MemFS {
    /// Create new in-memory filesystem
    pub fn new() -> Self {
        let nodes = DashMap::with_hasher(RandomState::new());

        // Create root directory
        nodes.insert(PathBuf::from("/"), Node::empty_dir());

        Self {
            nodes: Arc::new(nodes),
            max_size: None,
            current_size: Arc::new(AtomicUsize::new(0)),
            tree_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create with size limit (total bytes of file data)
    pub fn with_capacity(max_size: usize) -> Self {
        let mut fs = Self::new();
        fs.max_size = Some(max_size);
        fs
    }

    /// Bytes of file data currently stored
    pub fn used_bytes(&self) -> usize {
        self.current_size.load(Ordering::SeqCst)
    }

    /// Normalize path (make absolute and clean)
    pub(super) fn normalize(&self, path: &Path) -> PathBuf {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new("/").join(path)
        };

        // path_clean handles ., .., and repeated separators
        PathBuf::from(path_clean::clean(&path))
    }

    /// Check if space is available and reserve it atomically
    pub(super) fn check_and_reserve_space(&self, additional: usize) -> VfsResult<()> {
        let Some(max) = self.max_size else {
            self.current_size.fetch_add(additional, Ordering::SeqCst);
            return Ok(());
        };

        loop {
            let current = self.current_size.load(Ordering::SeqCst);
            if current + additional > max {
                return Err(VfsError::OutOfSpace);
            }
            if self
                .current_size
                .compare_exchange(
                    current,
                    current + additional,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_ok()
            {
                return Ok(());
            }
        }
    }

    /// Release reserved space
    pub(super) fn release_space(&self, amount: usize) {
        self.current_size.fetch_sub(amount, Ordering::SeqCst);
    }

    /// Get parent directory path
    pub(super) fn parent_path(&self, path: &Path) -> Option<PathBuf> {
        path.parent().map(|p| p.to_path_buf())
    }

    /// Get file name from path
    pub(super) fn file_name(&self, path: &Path) -> VfsResult<String> {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| VfsError::InvalidPath(format!("invalid path: {}", path.display())))
    }

    /// Name reported in stat records; the root reports "/"
    pub(super) fn entry_name(&self, path: &Path) -> String {
        self.file_name(path).unwrap_or_else(|_| "/".to_string())
    }

    /// Ensure parent directory exists
    pub(super) fn ensure_parent(&self, path: &Path) -> VfsResult<()> {
        if let Some(parent) = self.parent_path(path) {
            match self.nodes.get(&parent) {
                Some(node) if node.is_dir() => {}
                Some(_) => return Err(VfsError::NotADirectory(parent.display().to_string())),
                None => {
                    return Err(VfsError::NotFound(format!(
                        "parent directory not found: {}",
                        parent.display()
                    )))
                }
            }
        }
        Ok(())
    }

    /// Add child to parent directory
    pub(super) fn add_child(
        &self,
        parent_path: &Path,
        child_name: &str,
        child_path: &Path,
    ) -> VfsResult<()> {
        match self.nodes.get_mut(parent_path) {
            Some(mut node) => match node.value_mut() {
                Node::Directory { children, .. } => {
                    children.insert(child_name.to_string(), child_path.to_path_buf());
                    Ok(())
                }
                Node::File { .. } => Err(VfsError::NotADirectory(parent_path.display().to_string())),
            },
            None => Err(VfsError::NotFound(parent_path.display().to_string())),
        }
    }

    /// Remove child from parent directory
    pub(super) fn remove_child(&self, parent_path: &Path, child_name: &str) -> VfsResult<()> {
        match self.nodes.get_mut(parent_path) {
            Some(mut node) => match node.value_mut() {
                Node::Directory { children, .. } => {
                    children.remove(child_name);
                    Ok(())
                }
                Node::File { .. } => Err(VfsError::NotADirectory(parent_path.display().to_string())),
            },
            None => Err(VfsError::NotFound(parent_path.display().to_string())),
        }
    }
}

impl Default for MemFS {
    fn default() -> Self {
        Self::new()
    }
}

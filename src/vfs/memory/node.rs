/*!
 * Filesystem Node Types
 * Internal representation of files and directories
 */

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::SystemTime;

use super::super::types::{FileType, Metadata, Permissions};

/// In-memory filesystem node
///
/// Directory children are keyed by name in a `BTreeMap`, so raw listings come
/// out in name order.
#[derive(Debug, Clone)]
pub(in crate::vfs) enum Node {
    File {
        data: Vec<u8>,
        permissions: Permissions,
        modified: SystemTime,
        created: SystemTime,
    },
    Directory {
        children: BTreeMap<String, PathBuf>,
        permissions: Permissions,
        modified: SystemTime,
        created: SystemTime,
    },
}

impl Node {
    pub fn empty_dir() -> Self {
        let now = SystemTime::now();
        Node::Directory {
            children: BTreeMap::new(),
            permissions: Permissions::directory(),
            modified: now,
            created: now,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    pub fn file_type(&self) -> FileType {
        match self {
            Node::File { .. } => FileType::File,
            Node::Directory { .. } => FileType::Directory,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Node::File { data, .. } => data.len() as u64,
            Node::Directory { .. } => 0,
        }
    }

    /// Stat record for this node under the given name
    pub fn metadata(&self, name: impl Into<String>) -> Metadata {
        let (permissions, modified, created) = match self {
            Node::File {
                permissions,
                modified,
                created,
                ..
            }
            | Node::Directory {
                permissions,
                modified,
                created,
                ..
            } => (*permissions, *modified, *created),
        };

        Metadata {
            name: name.into(),
            file_type: self.file_type(),
            size: self.size(),
            permissions,
            modified,
            accessed: modified,
            created,
        }
    }
}

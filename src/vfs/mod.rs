/*!
 * Virtual File System Module
 * Pluggable filesystem backends behind a common handle-based contract
 */

pub mod local;
pub mod memory;
pub mod traits;
pub mod types;

// Re-exports
pub use local::LocalFS;
pub use memory::MemFS;
pub use traits::{FileSystem, OpenFile};
pub use types::{
    FileType, Metadata, OpenFlags, OpenMode, Permissions, VfsError, VfsResult, PARENT_ENTRY,
    SELF_ENTRY,
};

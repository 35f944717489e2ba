/*!
 * VFS Types
 * Shared types for filesystem operations with serde support
 */

mod errors;
mod file_type;
mod metadata;
mod open_flags;
mod permissions;

pub use errors::{VfsError, VfsResult};
pub use file_type::FileType;
pub use metadata::{Metadata, PARENT_ENTRY, SELF_ENTRY};
pub use open_flags::{OpenFlags, OpenMode};
pub use permissions::Permissions;

/*!
 * VFS Bridge Library
 * Read-only standard filesystem view over pluggable VFS backends
 */

pub mod bridge;
pub mod config;
pub mod core;
pub mod fsys;
pub mod tracer;
pub mod vfs;

// Re-exports
pub use bridge::{BridgeDirEntry, BridgeFile, BridgeFs};
pub use config::BridgeConfig;
pub use fsys::{
    glob, walk_dir, FsDirEntry, FsFile, OpenFs, ReadDirFile, ReadDirFs, ReadFileFs, StatFs, SubFs,
    WalkControl,
};
pub use tracer::init_tracing;
pub use vfs::{
    FileSystem, FileType, LocalFS, MemFS, Metadata, OpenFile, OpenFlags, OpenMode, Permissions,
    VfsError, VfsResult,
};

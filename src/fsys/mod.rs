/*!
 * Standard Filesystem Interface
 * Read-only traits plus the generic consumers built on them
 */

pub mod glob;
pub mod path;
pub mod traits;
pub mod walk;

// Re-exports
pub use glob::{glob, Pattern};
pub use path::{valid_path, ROOT};
pub use traits::{FsDirEntry, FsFile, OpenFs, ReadDirFile, ReadDirFs, ReadFileFs, StatFs, SubFs};
pub use walk::{walk_dir, WalkControl};

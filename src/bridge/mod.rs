/*!
 * VFS Bridge
 * Exposes a VFS backend through the standard read-only `fsys` traits
 *
 * Listings never contain the `.` and `..` pseudo-entries, and limited
 * listings page through the real children only.
 */

mod entry;
mod file;
mod fs;
mod listing;

pub use entry::BridgeDirEntry;
pub use file::BridgeFile;
pub use fs::BridgeFs;

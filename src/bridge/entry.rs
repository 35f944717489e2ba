/*!
 * Bridge Directory Entry
 * Listing entry backed by the stat record captured at listing time
 */

use crate::fsys::FsDirEntry;
use crate::vfs::{FileType, Metadata};

/// One child returned by a bridged directory listing
///
/// Never named `.` or `..`; the listing code filters those out before
/// constructing entries.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeDirEntry {
    info: Metadata,
}

impl BridgeDirEntry {
    pub(crate) fn new(info: Metadata) -> Self {
        debug_assert!(!info.is_pseudo_entry());
        Self { info }
    }

    /// Take the captured stat record
    pub fn into_info(self) -> Metadata {
        self.info
    }
}

impl FsDirEntry for BridgeDirEntry {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn is_dir(&self) -> bool {
        self.info.is_dir()
    }

    fn file_type(&self) -> FileType {
        self.info.file_type
    }

    fn info(&self) -> &Metadata {
        &self.info
    }
}

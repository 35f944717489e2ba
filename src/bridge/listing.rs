/*!
 * Listing Policy
 * Pseudo-entry filtering and limited reads across the filtering boundary
 */

use tracing::trace;

use super::entry::BridgeDirEntry;
use crate::vfs::{Metadata, OpenFile, VfsResult};

/// Upper bound on the up-front allocation for a limited listing
const PAGE_CAPACITY_HINT: usize = 64;

/// Keep only real children, wrapping each in a bridge entry
pub(super) fn keep_children(raw: Vec<Metadata>) -> Vec<BridgeDirEntry> {
    let total = raw.len();
    let kept: Vec<BridgeDirEntry> = raw
        .into_iter()
        .filter(|info| !info.is_pseudo_entry())
        .map(BridgeDirEntry::new)
        .collect();

    if kept.len() != total {
        trace!(dropped = total - kept.len(), "skipped pseudo-entries");
    }
    kept
}

/// Every remaining child of an open directory handle
pub(super) fn read_all(handle: &mut dyn OpenFile) -> VfsResult<Vec<BridgeDirEntry>> {
    handle.readdir(0).map(keep_children)
}

/// At most `limit` children of an open directory handle
///
/// Pulls raw entries one at a time until `limit` real children are collected
/// or the source runs dry. No raw entry beyond the last returned child is
/// consumed, so the next call resumes exactly where this one stopped.
///
/// Exhaustion with nothing collected propagates the handle's end-of-directory
/// error; exhaustion after collecting some children returns them. Any other
/// handle error is returned as-is and the children collected so far are
/// dropped.
pub(super) fn read_limited(
    handle: &mut dyn OpenFile,
    limit: usize,
) -> VfsResult<Vec<BridgeDirEntry>> {
    let mut entries = Vec::with_capacity(limit.min(PAGE_CAPACITY_HINT));

    while entries.len() < limit {
        let batch = match handle.readdir(1) {
            Ok(batch) => batch,
            Err(e) if e.is_end_of_directory() && !entries.is_empty() => break,
            Err(e) => return Err(e),
        };
        if batch.is_empty() {
            break;
        }
        entries.extend(keep_children(batch));
    }

    Ok(entries)
}

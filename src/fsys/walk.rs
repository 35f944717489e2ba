/*!
 * Directory Walker
 * Lexical pre-order traversal over any ReadDirFs + StatFs
 */

use tracing::trace;

use super::path::join;
use super::traits::{FsDirEntry, ReadDirFs, StatFs};
use crate::vfs::{Metadata, VfsError, VfsResult};

/// What the walker does after a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Keep walking; descend if the visited entry is a directory
    Continue,
    /// Do not descend into this directory; on a file, skip its remaining siblings
    SkipDir,
    /// Stop the walk without error
    SkipAll,
}

/// Walk the tree rooted at `root`, calling `visit` for every file and directory
///
/// The visitor receives the slash-joined path, the entry's stat record and,
/// for a directory whose listing failed, the listing error. That failure
/// visit happens after the directory's first (error-free) visit; returning
/// `Ok(Continue)` from it skips the directory and the walk goes on.
///
/// Children are visited in name order. A failing stat of `root` is returned
/// directly. A visitor error aborts the walk and is returned.
pub fn walk_dir<F, V>(fsys: &F, root: &str, mut visit: V) -> VfsResult<()>
where
    F: ReadDirFs + StatFs + ?Sized,
    V: FnMut(&str, &Metadata, Option<&VfsError>) -> VfsResult<WalkControl>,
{
    let info = fsys.stat(root)?;
    walk(fsys, root, &info, &mut visit).map(|_| ())
}

fn walk<F, V>(fsys: &F, path: &str, info: &Metadata, visit: &mut V) -> VfsResult<WalkControl>
where
    F: ReadDirFs + StatFs + ?Sized,
    V: FnMut(&str, &Metadata, Option<&VfsError>) -> VfsResult<WalkControl>,
{
    let control = visit(path, info, None)?;
    if control != WalkControl::Continue || !info.is_dir() {
        // SkipDir on a directory only prunes that directory
        if control == WalkControl::SkipDir && info.is_dir() {
            return Ok(WalkControl::Continue);
        }
        return Ok(control);
    }

    let mut entries = match fsys.read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            trace!(path, error = %e, "walk: listing failed");
            return match visit(path, info, Some(&e))? {
                WalkControl::SkipAll => Ok(WalkControl::SkipAll),
                _ => Ok(WalkControl::Continue),
            };
        }
    };
    entries.sort_by(|a, b| a.name().cmp(b.name()));

    for entry in &entries {
        let child = join(path, entry.name());
        match walk(fsys, &child, entry.info(), visit)? {
            WalkControl::Continue => {}
            WalkControl::SkipDir => break,
            WalkControl::SkipAll => return Ok(WalkControl::SkipAll),
        }
    }
    Ok(WalkControl::Continue)
}

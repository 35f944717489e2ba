/*!
 * VFS Bridge - Demo Entry Point
 *
 * Writes a file through the VFS layer, then reads it back through the
 * standard filesystem view.
 */

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use vfs_bridge::{
    init_tracing, BridgeConfig, BridgeFs, FileSystem, FsDirEntry, OpenFile, OpenFlags, OpenMode,
    ReadDirFs, ReadFileFs, StatFs,
};

fn main() -> anyhow::Result<()> {
    let config = BridgeConfig::from_env();
    init_tracing(config.trace_json);

    info!("VFS bridge demo starting...");
    let backend = config.backend().context("failed to prepare backend")?;
    info!(backend = backend.name(), "Backend ready");

    // Write through the VFS handle API
    let mut handle = backend
        .open(Path::new("foo.txt"), OpenFlags::create(), OpenMode::default())
        .context("failed to create foo.txt")?;
    handle.write_all(b"bar\n").context("failed to write foo.txt")?;
    handle.close().context("failed to close foo.txt")?;

    // Read back through the standard view
    let fsys = BridgeFs::from_arc(backend);
    let info = fsys.stat("foo.txt")?;
    info!(name = %info.name, size = info.size, "Stat through bridge");

    let data = fsys.read_file("foo.txt").context("failed to read foo.txt")?;
    print!("{}", String::from_utf8_lossy(&data));

    for entry in fsys.read_dir(".")? {
        info!(name = entry.name(), is_dir = entry.is_dir(), "Root entry");
    }

    info!("Demo complete");
    Ok(())
}

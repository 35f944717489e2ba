/*!
 * MemFS Tests
 * Whole-file operations, directories, raw listings and handles
 */

use std::io::{Read, Write};
use std::path::Path;

use pretty_assertions::assert_eq;
use vfs_bridge::vfs::{PARENT_ENTRY, SELF_ENTRY};
use vfs_bridge::{FileSystem, MemFS, OpenFile, OpenFlags, OpenMode, VfsError};

fn raw_names(handle: &mut dyn OpenFile) -> Vec<String> {
    handle
        .readdir(0)
        .unwrap()
        .into_iter()
        .map(|md| md.name)
        .collect()
}

#[test]
fn test_memfs_basic() {
    let fs = MemFS::new();

    // Write and read
    fs.write(Path::new("/test.txt"), b"hello").unwrap();
    assert_eq!(fs.read(Path::new("/test.txt")).unwrap(), b"hello");

    // Exists
    assert!(fs.exists(Path::new("/test.txt")));
    assert!(!fs.exists(Path::new("/missing.txt")));

    // Delete
    fs.delete(Path::new("/test.txt")).unwrap();
    assert!(!fs.exists(Path::new("/test.txt")));
    assert!(matches!(fs.read(Path::new("/test.txt")), Err(VfsError::NotFound(_))));
}

#[test]
fn test_memfs_directories() {
    let fs = MemFS::new();

    // Nested creation works like mkdir -p
    fs.create_dir(Path::new("/testdir/nested")).unwrap();
    assert!(fs.metadata(Path::new("/testdir")).unwrap().is_dir());
    assert!(fs.metadata(Path::new("/testdir/nested")).unwrap().is_dir());

    fs.write(Path::new("/testdir/file.txt"), b"content").unwrap();

    // Non-empty directories stay
    assert!(matches!(
        fs.remove_dir(Path::new("/testdir")),
        Err(VfsError::InvalidArgument(_))
    ));

    fs.remove_dir(Path::new("/testdir/nested")).unwrap();
    assert!(!fs.exists(Path::new("/testdir/nested")));
}

#[test]
fn test_memfs_file_in_the_way() {
    let fs = MemFS::new();
    fs.write(Path::new("/blocker"), b"x").unwrap();

    assert!(matches!(
        fs.create_dir(Path::new("/blocker/child")),
        Err(VfsError::NotADirectory(_))
    ));
    assert!(matches!(
        fs.write(Path::new("/missing/child.txt"), b"x"),
        Err(VfsError::NotFound(_))
    ));
}

#[test]
fn test_capacity_limit() {
    let fs = MemFS::with_capacity(10);

    fs.write(Path::new("/small.txt"), b"hello").unwrap();
    assert_eq!(fs.used_bytes(), 5);

    assert!(matches!(
        fs.write(Path::new("/large.txt"), b"hello world"),
        Err(VfsError::OutOfSpace)
    ));
    assert!(!fs.exists(Path::new("/large.txt")));

    // Shrinking and deleting release space
    fs.write(Path::new("/small.txt"), b"hi").unwrap();
    assert_eq!(fs.used_bytes(), 2);
    fs.delete(Path::new("/small.txt")).unwrap();
    assert_eq!(fs.used_bytes(), 0);
}

#[test]
fn test_path_normalization() {
    let fs = MemFS::new();
    fs.write(Path::new("/test.txt"), b"hello").unwrap();

    assert!(fs.exists(Path::new("test.txt")));
    assert!(fs.exists(Path::new("//test.txt")));
    assert!(fs.exists(Path::new("/dir/../test.txt")));
}

#[test]
fn test_metadata_names() {
    let fs = MemFS::new();
    fs.create_dir(Path::new("/docs")).unwrap();
    fs.write(Path::new("/docs/readme.md"), b"# hi").unwrap();

    let info = fs.metadata(Path::new("docs/readme.md")).unwrap();
    assert_eq!(info.name, "readme.md");
    assert_eq!(info.size, 4);
    assert!(info.is_file());

    assert_eq!(fs.metadata(Path::new("/")).unwrap().name, "/");
}

#[test]
fn test_raw_listing_includes_pseudo_entries() {
    let fs = MemFS::new();
    fs.create_dir(Path::new("/dir")).unwrap();
    fs.write(Path::new("/dir/b"), b"").unwrap();
    fs.write(Path::new("/dir/a"), b"").unwrap();

    let mut handle = fs
        .open(Path::new("/dir"), OpenFlags::read_only(), OpenMode::default())
        .unwrap();
    assert_eq!(raw_names(handle.as_mut()), vec![SELF_ENTRY, PARENT_ENTRY, "a", "b"]);

    // Exhausted cursor
    assert!(handle.readdir(0).unwrap().is_empty());
    assert!(matches!(handle.readdir(1), Err(VfsError::EndOfDirectory)));
    handle.close().unwrap();
}

#[test]
fn test_raw_listing_limits() {
    let fs = MemFS::new();
    fs.create_dir(Path::new("/dir")).unwrap();
    fs.write(Path::new("/dir/only"), b"").unwrap();

    let mut handle = fs
        .open(Path::new("/dir"), OpenFlags::read_only(), OpenMode::default())
        .unwrap();
    assert_eq!(handle.readdir(2).unwrap().len(), 2);
    assert_eq!(handle.readdir(2).unwrap()[0].name, "only");
    assert!(matches!(handle.readdir(2), Err(VfsError::EndOfDirectory)));
}

#[test]
fn test_handle_write_commits_on_close() {
    let fs = MemFS::new();
    let mut handle = fs
        .open(Path::new("/new.txt"), OpenFlags::create(), OpenMode::new(0o600))
        .unwrap();
    handle.write_all(b"buffered").unwrap();

    // Visible through the handle before commit
    assert_eq!(handle.metadata().unwrap().size, 8);
    handle.close().unwrap();

    assert_eq!(fs.read(Path::new("/new.txt")).unwrap(), b"buffered");
    assert_eq!(fs.metadata(Path::new("/new.txt")).unwrap().permissions.mode, 0o600);
}

#[test]
fn test_handle_append() {
    let fs = MemFS::new();
    fs.write(Path::new("/log.txt"), b"one\n").unwrap();

    let mut handle = fs
        .open(Path::new("/log.txt"), OpenFlags::append_only(), OpenMode::default())
        .unwrap();
    handle.write_all(b"two\n").unwrap();
    handle.close().unwrap();

    assert_eq!(fs.read(Path::new("/log.txt")).unwrap(), b"one\ntwo\n");
}

#[test]
fn test_handle_closed_state() {
    let fs = MemFS::new();
    fs.write(Path::new("/data.bin"), b"abc").unwrap();

    let mut handle = fs
        .open(Path::new("/data.bin"), OpenFlags::read_only(), OpenMode::default())
        .unwrap();
    handle.close().unwrap();

    let mut buf = [0u8; 2];
    let err = handle.read(&mut buf).unwrap_err();
    assert!(matches!(VfsError::from_io(err, "data.bin"), VfsError::Closed(_)));
    assert!(matches!(handle.metadata(), Err(VfsError::Closed(_))));
    assert!(matches!(handle.close(), Err(VfsError::Closed(_))));
}

#[test]
fn test_open_rules() {
    let fs = MemFS::new();
    fs.create_dir(Path::new("/dir")).unwrap();
    fs.write(Path::new("/file"), b"x").unwrap();

    assert!(matches!(
        fs.open(Path::new("/missing"), OpenFlags::read_only(), OpenMode::default()),
        Err(VfsError::NotFound(_))
    ));
    assert!(matches!(
        fs.open(Path::new("/dir"), OpenFlags::read_write(), OpenMode::default()),
        Err(VfsError::IsADirectory(_))
    ));

    let exclusive = OpenFlags {
        write: true,
        create_new: true,
        ..Default::default()
    };
    assert!(matches!(
        fs.open(Path::new("/file"), exclusive, OpenMode::default()),
        Err(VfsError::AlreadyExists(_))
    ));
    assert!(matches!(
        fs.open(Path::new("/file"), OpenFlags::default(), OpenMode::default()),
        Err(VfsError::InvalidArgument(_))
    ));

    // Reading a write-only handle fails
    let mut handle = fs
        .open(Path::new("/file"), OpenFlags::create(), OpenMode::default())
        .unwrap();
    let mut buf = [0u8; 1];
    assert!(handle.read(&mut buf).is_err());
    handle.close().unwrap();
    assert!(fs.read(Path::new("/file")).unwrap().is_empty());
}

/*!
 * Adapter Tests
 * Open, read, stat, close and sub through BridgeFs
 */

use std::io::Read;
use std::path::Path;
use std::sync::atomic::Ordering;

use pretty_assertions::assert_eq;
use vfs_bridge::{
    BridgeFs, FileSystem, FsFile, MemFS, OpenFs, ReadDirFs, ReadFileFs, StatFs, SubFs, VfsError,
};

use crate::support::{populated_memfs, sorted_names, FaultyFs, Faults, CHILDREN, HELLO};

#[test]
fn test_read_file_returns_contents() {
    let fsys = BridgeFs::new(populated_memfs());
    assert_eq!(fsys.read_file("hello.txt").unwrap(), HELLO);
}

#[test]
fn test_read_file_missing() {
    let fsys = BridgeFs::new(MemFS::new());
    assert!(matches!(fsys.read_file("nope.txt"), Err(VfsError::NotFound(_))));
}

#[test]
fn test_read_file_on_directory() {
    let fsys = BridgeFs::new(populated_memfs());
    assert!(matches!(fsys.read_file("dir"), Err(VfsError::IsADirectory(_))));
}

#[test]
fn test_write_then_read_file() {
    let backend = MemFS::new();
    let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    backend.write(Path::new("blob.bin"), &payload).unwrap();

    let fsys = BridgeFs::new(backend);
    assert_eq!(fsys.read_file("blob.bin").unwrap(), payload);
}

#[test]
fn test_stat_file() {
    let fsys = BridgeFs::new(populated_memfs());
    let info = fsys.stat("hello.txt").unwrap();

    assert_eq!(info.name, "hello.txt");
    assert_eq!(info.size, 13);
    assert!(!info.is_dir());
}

#[test]
fn test_stat_directory_and_missing() {
    let fsys = BridgeFs::new(populated_memfs());
    assert!(fsys.stat("dir").unwrap().is_dir());
    assert!(matches!(fsys.stat("missing"), Err(VfsError::NotFound(_))));
}

#[test]
fn test_open_and_stat_handle() {
    let fsys = BridgeFs::new(populated_memfs());
    let mut file = fsys.open("hello.txt").unwrap();

    let info = file.stat().unwrap();
    assert_eq!(info.name, "hello.txt");
    assert_eq!(info.size, 13);
    file.close().unwrap();
}

#[test]
fn test_open_missing_propagates() {
    let fsys = BridgeFs::new(MemFS::new());
    assert!(matches!(fsys.open("ghost"), Err(VfsError::NotFound(_))));
}

#[test]
fn test_chunked_reads_share_one_cursor() {
    let backend = MemFS::new();
    backend.write(Path::new("abc.txt"), b"ABCDEFGH").unwrap();
    let fsys = BridgeFs::new(backend);

    let mut file = fsys.open("abc.txt").unwrap();
    let mut buf = [0u8; 3];

    assert_eq!(file.read(&mut buf).unwrap(), 3);
    assert_eq!(&buf, b"ABC");
    assert_eq!(file.read(&mut buf).unwrap(), 3);
    assert_eq!(&buf, b"DEF");
    assert_eq!(file.read(&mut buf).unwrap(), 2);
    assert_eq!(&buf[..2], b"GH");

    // End of stream is not an error
    assert_eq!(file.read(&mut buf).unwrap(), 0);
    file.close().unwrap();
}

#[test]
fn test_read_after_close_fails() {
    let fsys = BridgeFs::new(populated_memfs());
    let mut file = fsys.open("hello.txt").unwrap();
    file.close().unwrap();

    let mut buf = [0u8; 4];
    let err = file.read(&mut buf).unwrap_err();
    assert!(matches!(VfsError::from_io(err, "hello.txt"), VfsError::Closed(_)));
}

#[test]
fn test_close_failure_replaces_successful_read() {
    let faulty = FaultyFs::new(
        populated_memfs(),
        Faults {
            close: true,
            ..Default::default()
        },
    );
    let closes = faulty.close_counter();
    let fsys = BridgeFs::new(faulty);

    match fsys.read_file("hello.txt") {
        Err(VfsError::IoError(msg)) => assert!(msg.contains("injected close failure")),
        other => panic!("expected close failure, got {:?}", other),
    }
    assert_eq!(closes.load(Ordering::SeqCst), 1);

    match fsys.read_dir("dir") {
        Err(VfsError::IoError(msg)) => assert!(msg.contains("injected close failure")),
        other => panic!("expected close failure, got {:?}", other),
    }
    assert_eq!(closes.load(Ordering::SeqCst), 2);
}

#[test]
fn test_read_failure_wins_and_still_closes() {
    let faulty = FaultyFs::new(
        populated_memfs(),
        Faults {
            read: true,
            close: true,
            ..Default::default()
        },
    );
    let closes = faulty.close_counter();
    let fsys = BridgeFs::new(faulty);

    match fsys.read_file("hello.txt") {
        Err(VfsError::IoError(msg)) => assert!(msg.contains("injected read failure")),
        other => panic!("expected read failure, got {:?}", other),
    }
    assert_eq!(closes.load(Ordering::SeqCst), 1);

    match fsys.read_dir("dir") {
        Err(VfsError::IoError(msg)) => assert!(msg.contains("injected listing failure")),
        other => panic!("expected listing failure, got {:?}", other),
    }
    assert_eq!(closes.load(Ordering::SeqCst), 2);
}

#[test]
fn test_open_failure_skips_close() {
    let faulty = FaultyFs::new(
        populated_memfs(),
        Faults {
            open: true,
            ..Default::default()
        },
    );
    let closes = faulty.close_counter();
    let fsys = BridgeFs::new(faulty);

    assert!(matches!(fsys.read_file("hello.txt"), Err(VfsError::PermissionDenied(_))));
    assert!(matches!(fsys.read_dir("dir"), Err(VfsError::PermissionDenied(_))));
    assert_eq!(closes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_sub_resolves_below_dir() {
    let backend = populated_memfs();
    backend.create_dir(Path::new("dir/nested")).unwrap();
    backend.write(Path::new("dir/nested/deep.txt"), b"deep").unwrap();
    let fsys = BridgeFs::new(backend);

    let sub = fsys.sub("dir").unwrap();
    assert_eq!(sub.read_file("alpha").unwrap(), b"alpha");
    assert!(sub.stat(".").unwrap().is_dir());

    let mut expected: Vec<String> = CHILDREN.iter().map(|s| s.to_string()).collect();
    expected.push("nested".to_string());
    expected.sort();
    assert_eq!(sorted_names(&sub.read_dir(".").unwrap()), expected);

    // Nested subs compose
    let deeper = sub.sub("nested").unwrap();
    assert_eq!(deeper.read_file("deep.txt").unwrap(), b"deep");
}

#[test]
fn test_sub_rejects_invalid_names() {
    let fsys = BridgeFs::new(populated_memfs());

    for bad in ["", "/dir", "dir/", "../dir", "dir/../x", "a//b"] {
        assert!(
            matches!(fsys.sub(bad), Err(VfsError::InvalidPath(_))),
            "sub({:?}) should be rejected",
            bad
        );
    }

    // Names inside a sub view cannot climb out of it
    let sub = fsys.sub("dir").unwrap();
    assert!(matches!(sub.read_file("../hello.txt"), Err(VfsError::InvalidPath(_))));
    assert!(matches!(sub.open("/hello.txt"), Err(VfsError::InvalidPath(_))));
}

#[test]
fn test_sub_dot_is_equivalent() {
    let fsys = BridgeFs::new(populated_memfs());
    let same = fsys.sub(".").unwrap();

    assert_eq!(same.read_file("hello.txt").unwrap(), HELLO);
    assert_eq!(
        sorted_names(&same.read_dir(".").unwrap()),
        sorted_names(&fsys.read_dir(".").unwrap())
    );
}

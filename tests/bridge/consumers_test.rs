/*!
 * Consumer Tests
 * walk_dir and glob driven through BridgeFs
 */

use std::path::Path;

use pretty_assertions::assert_eq;
use vfs_bridge::fsys::Pattern;
use vfs_bridge::{glob, walk_dir, BridgeFs, FileSystem, MemFS, SubFs, VfsError, WalkControl};

/// a.txt, b.md, docs/{guide.txt, notes.txt, img/logo.png}, src/main.rs
fn tree() -> BridgeFs {
    let fs = MemFS::new();
    fs.write(Path::new("b.md"), b"b").unwrap();
    fs.write(Path::new("a.txt"), b"a").unwrap();
    fs.create_dir(Path::new("docs/img")).unwrap();
    fs.write(Path::new("docs/notes.txt"), b"n").unwrap();
    fs.write(Path::new("docs/guide.txt"), b"g").unwrap();
    fs.write(Path::new("docs/img/logo.png"), b"p").unwrap();
    fs.create_dir(Path::new("src")).unwrap();
    fs.write(Path::new("src/main.rs"), b"fn main() {}").unwrap();
    BridgeFs::new(fs)
}

fn walk_paths(fsys: &BridgeFs, root: &str) -> Vec<String> {
    let mut paths = Vec::new();
    walk_dir(fsys, root, |path, _, err| {
        assert!(err.is_none());
        paths.push(path.to_string());
        Ok(WalkControl::Continue)
    })
    .unwrap();
    paths
}

#[test]
fn test_walk_lexical_preorder() {
    let fsys = tree();
    assert_eq!(
        walk_paths(&fsys, "."),
        vec![
            ".",
            "a.txt",
            "b.md",
            "docs",
            "docs/guide.txt",
            "docs/img",
            "docs/img/logo.png",
            "docs/notes.txt",
            "src",
            "src/main.rs",
        ]
    );
}

#[test]
fn test_walk_never_reports_pseudo_entries() {
    let fsys = tree();
    for path in walk_paths(&fsys, ".").iter().skip(1) {
        let base = path.rsplit('/').next().unwrap();
        assert!(base != "." && base != "..", "unexpected entry {}", path);
    }
}

#[test]
fn test_walk_skip_dir() {
    let fsys = tree();
    let mut paths = Vec::new();
    walk_dir(&fsys, ".", |path, info, _| {
        paths.push(path.to_string());
        if info.is_dir() && path == "docs" {
            return Ok(WalkControl::SkipDir);
        }
        Ok(WalkControl::Continue)
    })
    .unwrap();

    assert_eq!(paths, vec![".", "a.txt", "b.md", "docs", "src", "src/main.rs"]);
}

#[test]
fn test_walk_skip_dir_on_file_skips_siblings() {
    let fsys = tree();
    let mut paths = Vec::new();
    walk_dir(&fsys, ".", |path, _, _| {
        paths.push(path.to_string());
        if path == "docs/guide.txt" {
            return Ok(WalkControl::SkipDir);
        }
        Ok(WalkControl::Continue)
    })
    .unwrap();

    assert_eq!(
        paths,
        vec![".", "a.txt", "b.md", "docs", "docs/guide.txt", "src", "src/main.rs"]
    );
}

#[test]
fn test_walk_skip_all() {
    let fsys = tree();
    let mut paths = Vec::new();
    walk_dir(&fsys, ".", |path, _, _| {
        paths.push(path.to_string());
        if path == "b.md" {
            return Ok(WalkControl::SkipAll);
        }
        Ok(WalkControl::Continue)
    })
    .unwrap();

    assert_eq!(paths, vec![".", "a.txt", "b.md"]);
}

#[test]
fn test_walk_visitor_error_aborts() {
    let fsys = tree();
    let result = walk_dir(&fsys, ".", |path, _, _| {
        if path == "docs" {
            return Err(VfsError::InvalidArgument("stop here".into()));
        }
        Ok(WalkControl::Continue)
    });
    assert!(matches!(result, Err(VfsError::InvalidArgument(_))));
}

#[test]
fn test_walk_missing_root() {
    let fsys = tree();
    let result = walk_dir(&fsys, "nowhere", |_, _, _| Ok(WalkControl::Continue));
    assert!(matches!(result, Err(VfsError::NotFound(_))));
}

#[test]
fn test_walk_sub_view() {
    let fsys = tree().sub("docs").unwrap();
    assert_eq!(
        walk_paths(&fsys, "."),
        vec![".", "guide.txt", "img", "img/logo.png", "notes.txt"]
    );
}

#[test]
fn test_glob_top_level() {
    let fsys = tree();
    assert_eq!(glob(&fsys, "*.txt").unwrap(), vec!["a.txt"]);
    assert_eq!(glob(&fsys, "*").unwrap(), vec!["a.txt", "b.md", "docs", "src"]);
}

#[test]
fn test_glob_nested() {
    let fsys = tree();
    assert_eq!(
        glob(&fsys, "docs/*.txt").unwrap(),
        vec!["docs/guide.txt", "docs/notes.txt"]
    );
    assert_eq!(glob(&fsys, "*/*.rs").unwrap(), vec!["src/main.rs"]);
    assert_eq!(glob(&fsys, "d?cs/img/[a-m]*").unwrap(), vec!["docs/img/logo.png"]);
}

#[test]
fn test_glob_literal_and_missing() {
    let fsys = tree();
    assert_eq!(glob(&fsys, "src/main.rs").unwrap(), vec!["src/main.rs"]);
    assert!(glob(&fsys, "src/lib.rs").unwrap().is_empty());
    assert!(glob(&fsys, "nowhere/*.txt").unwrap().is_empty());
}

#[test]
fn test_glob_invalid_literal_names() {
    let fsys = tree();
    for name in ["", "/a.txt", "./a.txt", "a.txt/", "docs//guide.txt", "docs/../a.txt"] {
        assert!(
            glob(&fsys, name).unwrap().is_empty(),
            "glob({:?}) should match nothing",
            name
        );
    }
}

#[test]
fn test_glob_malformed_pattern() {
    let fsys = tree();
    assert!(matches!(glob(&fsys, "docs/[").unwrap_err(), VfsError::InvalidArgument(_)));
    assert!(Pattern::new("[a-").is_err());
}

/*!
 * Glob Matching
 * Shell-style pattern matching over any ReadDirFs + StatFs
 *
 * Pattern syntax, applied per path element:
 * - `*` matches any run of characters
 * - `?` matches one character
 * - `[abc]`, `[a-z]`, `[^a-z]` match one character from (or outside) a class
 * - `\c` matches `c` literally
 */

use regex::Regex;

use super::path::{join, split, valid_path, ROOT};
use super::traits::{FsDirEntry, ReadDirFs, StatFs};
use crate::vfs::{VfsError, VfsResult};

fn bad_pattern(pattern: &str) -> VfsError {
    VfsError::InvalidArgument(format!("syntax error in pattern: {}", pattern))
}

/// Report whether `s` contains any glob metacharacter
fn has_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '\\'])
}

/// Compiled single-element pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern; malformed patterns fail with `InvalidArgument`
    pub fn new(pattern: &str) -> VfsResult<Self> {
        let mut out = String::with_capacity(pattern.len() * 2 + 2);
        out.push('^');

        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' => out.push_str("[^/]*"),
                '?' => out.push_str("[^/]"),
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| bad_pattern(pattern))?;
                    out.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4])));
                }
                '[' => {
                    out.push('[');
                    if chars.peek() == Some(&'^') {
                        chars.next();
                        out.push('^');
                    }
                    let mut ranges = 0;
                    loop {
                        if chars.peek() == Some(&']') && ranges > 0 {
                            chars.next();
                            break;
                        }
                        let lo = class_char(&mut chars).ok_or_else(|| bad_pattern(pattern))?;
                        push_class_char(&mut out, lo);
                        if chars.peek() == Some(&'-') {
                            chars.next();
                            let hi = class_char(&mut chars).ok_or_else(|| bad_pattern(pattern))?;
                            if hi < lo {
                                return Err(bad_pattern(pattern));
                            }
                            out.push('-');
                            push_class_char(&mut out, hi);
                        }
                        ranges += 1;
                    }
                    out.push(']');
                }
                other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        out.push('$');

        let regex = Regex::new(&out).map_err(|_| bad_pattern(pattern))?;
        Ok(Self { regex })
    }

    /// Report whether `name` matches the whole pattern
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Next literal character inside a class; `None` when the class is malformed
fn class_char(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<char> {
    match chars.next()? {
        '-' | ']' => None,
        '\\' => chars.next(),
        c => Some(c),
    }
}

fn push_class_char(out: &mut String, c: char) {
    out.push_str(&format!("\\x{{{:X}}}", c as u32));
}

/// Return the names of all files matching `pattern`, in lexical order
///
/// Only malformed patterns are errors; I/O failures while listing are
/// treated as "no matches" for the directory concerned.
pub fn glob<F>(fsys: &F, pattern: &str) -> VfsResult<Vec<String>>
where
    F: ReadDirFs + StatFs + ?Sized,
{
    glob_with_depth(fsys, pattern, 0)
}

fn glob_with_depth<F>(fsys: &F, pattern: &str, depth: usize) -> VfsResult<Vec<String>>
where
    F: ReadDirFs + StatFs + ?Sized,
{
    // Bounds recursion on adversarial patterns
    const MAX_DEPTH: usize = 10_000;
    if depth > MAX_DEPTH {
        return Err(bad_pattern(pattern));
    }

    // Reject malformed patterns before touching the filesystem
    for element in pattern.split('/') {
        Pattern::new(element)?;
    }

    if !has_meta(pattern) {
        if !valid_path(pattern) {
            return Ok(Vec::new());
        }
        return Ok(match fsys.stat(pattern) {
            Ok(_) => vec![pattern.to_string()],
            Err(_) => Vec::new(),
        });
    }

    let (dir, file) = split(pattern);
    let dir = clean_glob_dir(dir);
    let file_pattern = Pattern::new(file)?;

    if !has_meta(dir) {
        return Ok(glob_dir(fsys, dir, &file_pattern));
    }
    if dir == pattern {
        return Err(bad_pattern(pattern));
    }

    let mut matches = Vec::new();
    for parent in glob_with_depth(fsys, dir, depth + 1)? {
        matches.extend(glob_dir(fsys, &parent, &file_pattern));
    }
    Ok(matches)
}

/// Directory part of a split pattern without its trailing slash
fn clean_glob_dir(dir: &str) -> &str {
    match dir {
        "" => ROOT,
        _ => dir.trim_end_matches('/'),
    }
}

fn glob_dir<F>(fsys: &F, dir: &str, pattern: &Pattern) -> Vec<String>
where
    F: ReadDirFs + StatFs + ?Sized,
{
    let Ok(mut entries) = fsys.read_dir(dir) else {
        return Vec::new();
    };
    entries.sort_by(|a, b| a.name().cmp(b.name()));

    entries
        .iter()
        .filter(|entry| pattern.matches(entry.name()))
        .map(|entry| join(dir, entry.name()))
        .collect()
}

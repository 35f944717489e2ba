/*!
 * Standard Path Rules
 * Slash-separated, unrooted names as accepted by the standard traits
 */

/// Name of the filesystem root
pub const ROOT: &str = ".";

/// Report whether `name` is a valid path name
///
/// Valid names are unrooted, slash-separated sequences of elements where no
/// element is empty, `.` or `..`. The single name `.` denotes the root.
/// Leading and trailing slashes are invalid.
pub fn valid_path(name: &str) -> bool {
    if name == ROOT {
        return true;
    }
    !name.is_empty()
        && name
            .split('/')
            .all(|element| !element.is_empty() && element != "." && element != "..")
}

/// Join a directory name and a child name
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT || dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}

/// Split a name into its directory and final element
///
/// The directory keeps its trailing slash, so `"a/b"` splits into `("a/", "b")`.
pub fn split(name: &str) -> (&str, &str) {
    match name.rfind('/') {
        Some(index) => name.split_at(index + 1),
        None => ("", name),
    }
}

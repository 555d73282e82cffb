//! Path arithmetic relative to the base directory.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::{ResolveError, Result};

/// Name of the immediate child of `base` that contains `path`.
///
/// Walks upward from `path`'s parent until reaching `base`. When `path`
/// sits directly inside `base` its own file name is returned.
pub fn top_directory(base: &Path, path: &Path) -> Result<OsString> {
    let exhausted = || ResolveError::TraversalExhausted {
        base: base.to_path_buf(),
        path: path.to_path_buf(),
    };

    let mut last = path;
    let mut current = path.parent().ok_or_else(exhausted)?;
    while current != base {
        last = current;
        current = current.parent().ok_or_else(exhausted)?;
    }

    last.file_name().map(OsString::from).ok_or_else(exhausted)
}

/// `true` when `dir` lies within `base` (or is `base`) after lexical
/// normalization of both paths.
pub fn is_within(base: &Path, dir: &Path) -> bool {
    let base = normalize(base);
    let dir = normalize(dir);
    dir.is_absolute() == base.is_absolute() && dir.starts_with(&base)
}

/// Resolve `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

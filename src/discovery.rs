//! Producers of the path stream fed to the aggregator.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::resolver::normalize;

/// Every regular file beneath `root`, sorted for a stable walk order.
pub fn walk_files(root: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        warn!(root = %root.display(), "nothing to scan, directory does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(scan.follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(scan.skip_hidden && is_hidden(e)));

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Parse a newline-separated path list. Blank lines are skipped, relative
/// entries are joined onto `base` and `.`/`..` components are resolved.
pub fn read_path_list<R: BufRead>(reader: R, base: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read path list")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let path = Path::new(trimmed);
        paths.push(normalize(&base.join(path)));
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_walk_files_sorted_files_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b/index.js");
        touch(dir.path(), "a/package.json");
        touch(dir.path(), "a/dist/index.js");

        let files = walk_files(dir.path(), &ScanConfig::default()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a/dist/index.js"),
                PathBuf::from("a/package.json"),
                PathBuf::from("b/index.js"),
            ]
        );
    }

    #[test]
    fn test_walk_files_skip_hidden() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".cache/x.js");
        touch(dir.path(), "pkg/.npmignore");
        touch(dir.path(), "pkg/index.js");

        let scan = ScanConfig {
            skip_hidden: true,
            ..ScanConfig::default()
        };
        let files = walk_files(dir.path(), &scan).unwrap();
        assert_eq!(files, vec![dir.path().join("pkg/index.js")]);

        let all = walk_files(dir.path(), &ScanConfig::default()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = walk_files(&dir.path().join("node_modules"), &ScanConfig::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_read_path_list_resolves_parent_segments() {
        let input = "node_modules/../src/index.js\n/abs/node_modules/a/./b/../index.js\n";
        let paths = read_path_list(Cursor::new(input), Path::new("/work")).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/src/index.js"),
                PathBuf::from("/abs/node_modules/a/index.js"),
            ]
        );
    }

    #[test]
    fn test_read_path_list() {
        let input = "node_modules/a/index.js\n\n  /abs/node_modules/b/index.js  \n";
        let paths = read_path_list(Cursor::new(input), Path::new("/work")).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/node_modules/a/index.js"),
                PathBuf::from("/abs/node_modules/b/index.js"),
            ]
        );
    }
}

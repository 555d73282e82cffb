use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::models::PackageManifest;

pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

/// Finds the manifest that governs a directory.
pub trait ManifestReader {
    /// Nearest manifest in `start` or any of its ancestors, `None` when the
    /// filesystem root is reached without finding one.
    fn find_up(&self, start: &Path) -> Result<Option<PackageManifest>>;
}

/// Reads JSON manifests from disk.
pub struct FsManifestReader {
    file_name: String,
}

impl FsManifestReader {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl Default for FsManifestReader {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_FILE)
    }
}

impl ManifestReader for FsManifestReader {
    fn find_up(&self, start: &Path) -> Result<Option<PackageManifest>> {
        for dir in start.ancestors() {
            let candidate = dir.join(&self.file_name);
            if candidate.is_file() {
                debug!(manifest = %candidate.display(), "found manifest");
                return read_manifest(candidate).map(Some);
            }
        }
        Ok(None)
    }
}

fn read_manifest(path: PathBuf) -> Result<PackageManifest> {
    let unreadable = |reason: String| ResolveError::ManifestUnreadable {
        manifest: path.clone(),
        reason,
    };

    let content = std::fs::read_to_string(&path).map_err(|e| unreadable(e.to_string()))?;
    let json: Value = serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))?;
    if !json.is_object() {
        return Err(unreadable("manifest is not a JSON object".to_string()));
    }

    Ok(PackageManifest::from_json(path, json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_up_nearest_manifest() {
        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("node_modules/pkg1");
        fs::create_dir_all(pkg.join("dist")).unwrap();
        fs::write(
            pkg.join("package.json"),
            r#"{ "name": "pkg1", "version": "1.0.0", "license": "ISC" }"#,
        )
        .unwrap();

        let found = FsManifestReader::default()
            .find_up(&pkg.join("dist"))
            .unwrap()
            .unwrap();
        assert_eq!(found.name.as_deref(), Some("pkg1"));
        assert_eq!(found.version.as_deref(), Some("1.0.0"));
        assert_eq!(found.path, pkg.join("package.json"));
    }

    #[test]
    fn test_find_up_prefers_inner_manifest() {
        let dir = TempDir::new().unwrap();
        let esm = dir.path().join("pkg/dist/esm");
        fs::create_dir_all(&esm).unwrap();
        fs::write(dir.path().join("pkg/package.json"), r#"{ "name": "outer" }"#).unwrap();
        fs::write(esm.join("package.json"), r#"{ "type": "module" }"#).unwrap();

        let found = FsManifestReader::default().find_up(&esm).unwrap().unwrap();
        assert!(found.is_nameless());
        assert_eq!(found.path, esm.join("package.json"));
    }

    #[test]
    fn test_custom_manifest_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), r#"{ "name": "custom" }"#).unwrap();

        let found = FsManifestReader::new("manifest.json")
            .find_up(dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(found.name.as_deref(), Some("custom"));
    }

    #[test]
    fn test_invalid_json_is_unreadable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{ not json").unwrap();

        let err = FsManifestReader::default().find_up(dir.path()).unwrap_err();
        assert!(matches!(err, ResolveError::ManifestUnreadable { .. }));
    }

    #[test]
    fn test_non_object_is_unreadable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "[1, 2]").unwrap();

        let err = FsManifestReader::default().find_up(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }
}

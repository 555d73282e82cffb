use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::aggregator::{AggregatorOptions, DEFAULT_DEPENDENCY_ROOT};
use crate::license::default_license_files;
use crate::manifest::DEFAULT_MANIFEST_FILE;

/// Root configuration structure, deserialized from `.license-notices/config.toml`.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Folder under the base directory that holds installed packages.
    pub dependency_root: String,
    /// File name of the per-package manifest.
    pub manifest_file: String,
    /// License file names tried beside each manifest, in order.
    pub license_files: Vec<String>,
    /// File discovery settings used when paths are not supplied explicitly.
    pub scan: ScanConfig,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Descend into symlinked directories. Off by default, which skips
    /// symlinked package directories such as pnpm's `node_modules` layout;
    /// enable it (or pass paths via `--stdin`/`--files`) for those trees.
    pub follow_symlinks: bool,
    /// Skip files and directories whose name starts with `.`.
    pub skip_hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dependency_root: DEFAULT_DEPENDENCY_ROOT.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            license_files: default_license_files(),
            scan: ScanConfig::default(),
        }
    }
}

impl Config {
    pub fn aggregator_options(&self) -> AggregatorOptions {
        AggregatorOptions {
            dependency_root: self.dependency_root.clone(),
            license_files: self.license_files.clone(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<base_dir>/.license-notices/config.toml`
/// 3. `~/.config/license-notices/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = base_dir.join(".license-notices").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-notices")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.dependency_root, "node_modules");
        assert_eq!(cfg.manifest_file, "package.json");
        assert_eq!(cfg.license_files.len(), 8);
        assert_eq!(cfg.license_files[0], "LICENSE");
        assert!(!cfg.scan.follow_symlinks);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
dependency_root = "vendor"

[scan]
skip_hidden = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.dependency_root, "vendor");
        assert_eq!(cfg.manifest_file, "package.json");
        assert_eq!(cfg.license_files, default_license_files());
        assert!(cfg.scan.skip_hidden);
        assert!(!cfg.scan.follow_symlinks);
    }

    #[test]
    fn test_project_config_is_found() {
        let dir = TempDir::new().unwrap();
        let cfg_dir = dir.path().join(".license-notices");
        fs::create_dir_all(&cfg_dir).unwrap();
        fs::write(
            cfg_dir.join("config.toml"),
            r#"license_files = ["COPYING", "LICENSE"]"#,
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.license_files, vec!["COPYING", "LICENSE"]);
    }

    #[test]
    fn test_override_wins_over_project_config() {
        let dir = TempDir::new().unwrap();
        let cfg_dir = dir.path().join(".license-notices");
        fs::create_dir_all(&cfg_dir).unwrap();
        fs::write(cfg_dir.join("config.toml"), r#"dependency_root = "project""#).unwrap();
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, r#"dependency_root = "custom""#).unwrap();

        let cfg = load_config(dir.path(), Some(&custom)).unwrap();
        assert_eq!(cfg.dependency_root, "custom");
    }

    #[test]
    fn test_invalid_override_is_error() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("broken.toml");
        fs::write(&custom, "dependency_root = [").unwrap();

        let err = load_config(dir.path(), Some(&custom)).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn test_aggregator_options_follow_config() {
        let cfg = Config {
            dependency_root: "vendor".to_string(),
            ..Config::default()
        };
        let opts = cfg.aggregator_options();
        assert_eq!(opts.dependency_root, "vendor");
        assert_eq!(opts.license_files, cfg.license_files);
    }
}

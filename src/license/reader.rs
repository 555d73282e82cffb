use std::path::Path;

use tracing::debug;

/// File names tried, in order, when looking for a package's license text.
pub const DEFAULT_LICENSE_FILES: &[&str] = &[
    "LICENSE",
    "LICENSE.txt",
    "LICENSE.md",
    "LICENSE.rst",
    "license",
    "license.txt",
    "license.md",
    "license.rst",
];

/// Reads the license text shipped beside a manifest.
pub trait LicenseReader {
    /// Content of the first readable candidate in `dir`, `None` when no
    /// candidate could be read.
    fn read_license(&self, dir: &Path, candidates: &[String]) -> Option<String>;
}

pub struct FsLicenseReader;

impl LicenseReader for FsLicenseReader {
    fn read_license(&self, dir: &Path, candidates: &[String]) -> Option<String> {
        for name in candidates {
            let path = dir.join(name);
            match std::fs::read_to_string(&path) {
                Ok(text) => return Some(text),
                Err(e) => debug!(path = %path.display(), error = %e, "license candidate skipped"),
            }
        }
        None
    }
}

pub fn default_license_files() -> Vec<String> {
    DEFAULT_LICENSE_FILES.iter().map(|s| s.to_string()).collect()
}

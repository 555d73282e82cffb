//! Turns a stream of file paths into a sorted, deduplicated license report.
//!
//! Every path is mapped to the dependency directory it lives in and the
//! manifest that governs it. Packages are keyed by `name@version`; the first
//! manifest seen for a key is kept. Once the input is exhausted, entries are
//! emitted in byte order of their keys and each entry's license text is read
//! only when the entry is pulled from the [`Report`].

use std::collections::btree_map::{self, BTreeMap, Entry};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ResolveError, Result};
use crate::license::{default_license_files, FsLicenseReader, LicenseReader};
use crate::manifest::{FsManifestReader, ManifestReader};
use crate::models::{PackageKey, PackageManifest, ReportEntry, UNDEFINED};
use crate::resolver::{is_within, normalize, top_directory};

pub const DEFAULT_DEPENDENCY_ROOT: &str = "node_modules";

/// Knobs that vary between ecosystems.
#[derive(Debug, Clone)]
pub struct AggregatorOptions {
    /// Folder under the base directory holding installed packages.
    pub dependency_root: String,
    /// License file names, in lookup order.
    pub license_files: Vec<String>,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            dependency_root: DEFAULT_DEPENDENCY_ROOT.to_string(),
            license_files: default_license_files(),
        }
    }
}

pub struct PackageAggregator<M = FsManifestReader, L = FsLicenseReader> {
    base: PathBuf,
    options: AggregatorOptions,
    manifests: M,
    licenses: L,
    packages: BTreeMap<PackageKey, PackageManifest>,
}

impl PackageAggregator {
    /// Aggregator reading manifests and licenses from disk.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self::with_readers(
            base,
            AggregatorOptions::default(),
            FsManifestReader::default(),
            FsLicenseReader,
        )
    }
}

impl<M: ManifestReader, L: LicenseReader> PackageAggregator<M, L> {
    pub fn with_readers(
        base: impl Into<PathBuf>,
        options: AggregatorOptions,
        manifests: M,
        licenses: L,
    ) -> Self {
        let base: PathBuf = base.into();
        Self {
            base: normalize(&base),
            options,
            manifests,
            licenses,
            packages: BTreeMap::new(),
        }
    }

    /// Consume every path, then return the report.
    ///
    /// Paths are lexically normalized first, so `node_modules/../src/x.js`
    /// counts as living under `src`.
    ///
    /// The first resolution failure aborts the run; no entry is produced in
    /// that case.
    pub fn generate<I>(mut self, paths: I) -> Result<Report<L>>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut scanned = 0usize;
        for path in paths {
            let path = normalize(path.as_ref());
            let path = path.as_path();
            scanned += 1;
            if !self.in_dependency_root(path)? {
                debug!(path = %path.display(), "outside dependency root, skipped");
                continue;
            }
            let manifest = self.resolve(path)?;
            match self.packages.entry(manifest.key()) {
                Entry::Vacant(slot) => {
                    debug!(key = %slot.key(), manifest = %manifest.path.display(), "package added");
                    slot.insert(manifest);
                }
                Entry::Occupied(slot) => {
                    debug!(key = %slot.key(), "duplicate package ignored");
                }
            }
        }

        info!(
            scanned,
            packages = self.packages.len(),
            "dependency paths resolved"
        );

        Ok(Report {
            entries: self.packages.into_iter(),
            licenses: self.licenses,
            license_files: self.options.license_files,
        })
    }

    fn in_dependency_root(&self, path: &Path) -> Result<bool> {
        let top = top_directory(&self.base, path)?;
        Ok(top == self.options.dependency_root.as_str())
    }

    /// Manifest governing `path`, retried once past a nameless inner
    /// manifest that sits inside the dependency root.
    fn resolve(&self, path: &Path) -> Result<PackageManifest> {
        let start = path.parent().unwrap_or(path);
        let mut found = self.manifests.find_up(start)?;

        let retry_from = match &found {
            Some(inner) if inner.is_nameless() => {
                let inner_dir = inner.dir();
                if top_directory(&self.base, inner_dir)? == self.options.dependency_root.as_str() {
                    inner_dir.parent().map(Path::to_path_buf)
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some(outer_start) = retry_from {
            debug!(start = %outer_start.display(), "nameless manifest, retrying one level up");
            found = self.manifests.find_up(&outer_start)?;
        }

        let manifest = match found {
            Some(m) if !m.is_nameless() => m,
            other => return Err(invalid_manifest(other)),
        };

        if !is_within(&self.base, manifest.dir()) {
            return Err(ResolveError::ManifestOutsideBase {
                path: path.to_path_buf(),
                manifest: manifest.path,
            });
        }

        Ok(manifest)
    }
}

fn invalid_manifest(found: Option<PackageManifest>) -> ResolveError {
    match found {
        Some(m) => ResolveError::ManifestInvalid {
            content: serde_json::to_string_pretty(&m.raw).unwrap_or_else(|_| m.raw.to_string()),
            manifest: Some(m.path),
        },
        None => ResolveError::ManifestInvalid {
            manifest: None,
            content: UNDEFINED.to_string(),
        },
    }
}

/// Sorted report entries; license text is read as each entry is pulled.
pub struct Report<L = FsLicenseReader> {
    entries: btree_map::IntoIter<PackageKey, PackageManifest>,
    licenses: L,
    license_files: Vec<String>,
}

impl<L: LicenseReader> Iterator for Report<L> {
    type Item = ReportEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, manifest) = self.entries.next()?;
        let text = self
            .licenses
            .read_license(manifest.dir(), &self.license_files)
            .unwrap_or_default();
        if text.is_empty() {
            debug!(%key, "no license text found");
        }
        Some(ReportEntry::new(manifest, text))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<L: LicenseReader> ExactSizeIterator for Report<L> {}

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort report generation.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Walking up from `path` hit the filesystem root without meeting `base`.
    #[error("could not retrieve the top directory: base: {}, path: {}", .base.display(), .path.display())]
    TraversalExhausted { base: PathBuf, path: PathBuf },

    /// No manifest was found, or the one found has no name.
    #[error("valid manifest not found: manifest: {}, content: {content}", display_opt(.manifest))]
    ManifestInvalid {
        manifest: Option<PathBuf>,
        content: String,
    },

    #[error("manifest is outside of the base directory: path: {}, manifest: {}", .path.display(), .manifest.display())]
    ManifestOutsideBase { path: PathBuf, manifest: PathBuf },

    #[error("failed to read manifest: manifest: {}, reason: {reason}", .manifest.display())]
    ManifestUnreadable { manifest: PathBuf, reason: String },
}

fn display_opt(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<none>".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

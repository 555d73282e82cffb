//! `license-notices`: build the third-party notices document for the
//! installed dependencies a packaged artifact ships.
//!
//! # Flow
//! 1. A caller supplies a base directory and the file paths that end up in
//!    the artifact (from stdin, a list file, or [`discovery::walk_files`]).
//! 2. [`PackageAggregator`] keeps the paths that live under the dependency
//!    root, resolves each one's manifest ([`manifest`]) and deduplicates by
//!    `name@version`.
//! 3. The returned [`Report`] yields [`ReportEntry`] values in key order,
//!    reading each package's license text ([`license`]) as it goes.
//! 4. A writer in [`report`] renders the entries.

pub mod aggregator;
pub mod config;
pub mod discovery;
pub mod error;
pub mod license;
pub mod manifest;
pub mod models;
pub mod report;
pub mod resolver;

pub use aggregator::{AggregatorOptions, PackageAggregator, Report};
pub use error::ResolveError;
pub use models::{PackageKey, PackageManifest, ReportEntry};

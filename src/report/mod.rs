//! Report writers.
//!
//! - [`text`]: the plain-text notices document.
//! - [`json`]: a JSON array of packages, for tooling.
//! - [`terminal`]: a summary table of packages and whether license text was found.

pub mod json;
pub mod terminal;
pub mod text;

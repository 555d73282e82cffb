//! License text shipped beside package manifests.

mod reader;

pub use reader::{default_license_files, FsLicenseReader, LicenseReader, DEFAULT_LICENSE_FILES};

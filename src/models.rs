use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Placeholder printed for manifest fields that are absent.
pub const UNDEFINED: &str = "undefined";

/// A parsed package manifest together with the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    /// Absolute path of the manifest file.
    pub path: PathBuf,
    pub name: Option<String>,
    pub version: Option<String>,
    pub license: Option<Value>,
    pub description: Option<Value>,
    pub repository: Option<Value>,
    pub homepage: Option<Value>,
    pub author: Option<Value>,
    pub contributors: Option<Value>,
    /// The whole parsed document, kept for diagnostics.
    pub raw: Value,
}

impl PackageManifest {
    /// Build a manifest from a parsed JSON document.
    pub fn from_json(path: PathBuf, raw: Value) -> Self {
        let field = |key: &str| raw.get(key).cloned();
        let text = |key: &str| match raw.get(key) {
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Self {
            name: text("name"),
            version: text("version"),
            license: field("license"),
            description: field("description"),
            repository: field("repository"),
            homepage: field("homepage"),
            author: field("author"),
            contributors: field("contributors"),
            path,
            raw,
        }
    }

    /// Directory holding the manifest file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    /// `true` when the manifest carries no usable package name.
    pub fn is_nameless(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
    }

    pub fn key(&self) -> PackageKey {
        PackageKey::new(
            self.name.as_deref().unwrap_or_default(),
            self.version.as_deref().unwrap_or_default(),
        )
    }
}

/// Deduplication identity of a package: `name@version`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageKey(String);

impl PackageKey {
    pub fn new(name: &str, version: &str) -> Self {
        Self(format!("{}@{}", name, version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One package of the final report: its manifest fields and license text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub version: Option<String>,
    pub license: Option<Value>,
    pub description: Option<Value>,
    pub repository: Option<Value>,
    pub homepage: Option<Value>,
    pub author: Option<Value>,
    pub contributors: Option<Value>,
    pub license_text: String,
    #[serde(skip)]
    pub manifest_path: PathBuf,
}

impl ReportEntry {
    pub fn new(manifest: PackageManifest, license_text: String) -> Self {
        Self {
            name: manifest.name.unwrap_or_default(),
            version: manifest.version,
            license: manifest.license,
            description: manifest.description,
            repository: manifest.repository,
            homepage: manifest.homepage,
            author: manifest.author,
            contributors: manifest.contributors,
            license_text,
            manifest_path: manifest.path,
        }
    }

    pub fn key(&self) -> PackageKey {
        PackageKey::new(&self.name, self.version.as_deref().unwrap_or_default())
    }

    /// Whether a license file was found beside the manifest.
    pub fn has_license_text(&self) -> bool {
        !self.license_text.is_empty()
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "version: {}", self.version.as_deref().unwrap_or(UNDEFINED))?;
        writeln!(f, "license: {}", FieldDisplay(self.license.as_ref()))?;
        writeln!(f, "description: {}", FieldDisplay(self.description.as_ref()))?;
        writeln!(f, "repository: {}", FieldDisplay(self.repository.as_ref()))?;
        writeln!(f, "homepage: {}", FieldDisplay(self.homepage.as_ref()))?;
        writeln!(f, "author: {}", FieldDisplay(self.author.as_ref()))?;
        writeln!(f, "contributors: {}", FieldDisplay(self.contributors.as_ref()))?;
        writeln!(f, "===")?;
        writeln!(f, "{}", self.license_text)
    }
}

/// Renders a manifest field: strings literally, structured values as
/// pretty-printed JSON, absence as [`UNDEFINED`].
///
/// Strings are not JSON-quoted, so `"author": ""` renders as `author: `
/// rather than `author: ""`. Notices diffed against output from tools that
/// JSON-stringify every person/repository field differ on these lines.
pub struct FieldDisplay<'a>(pub Option<&'a Value>);

impl fmt::Display for FieldDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str(UNDEFINED),
            Some(Value::String(s)) => f.write_str(s),
            Some(v @ (Value::Array(_) | Value::Object(_))) => {
                let pretty = serde_json::to_string_pretty(v).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
            Some(scalar) => write!(f, "{}", scalar),
        }
    }
}

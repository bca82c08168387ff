// lazyapp-common/src/model/package.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LazyAppError, Result};

/// A single license declaration. A missing `free` marker means the license is free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(default, alias = "spdxId")]
    pub spdx_id: Option<String>,
    #[serde(default, alias = "shortName")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub free: Option<bool>,
}

impl License {
    pub fn is_free(&self) -> bool {
        self.free.unwrap_or(true)
    }
}

/// Helper to coerce a single license or a list of licenses into Vec<License>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LicenseList {
    Many(Vec<License>),
    One(License),
}

impl Default for LicenseList {
    fn default() -> Self {
        LicenseList::Many(Vec::new())
    }
}

impl LicenseList {
    pub fn as_slice(&self) -> &[License] {
        match self {
            LicenseList::Many(v) => v,
            LicenseList::One(l) => std::slice::from_ref(l),
        }
    }

    /// Free unless at least one declared license is explicitly marked non-free.
    pub fn is_free(&self) -> bool {
        self.as_slice().iter().all(License::is_free)
    }
}

impl From<Vec<License>> for LicenseList {
    fn from(v: Vec<License>) -> Self {
        LicenseList::Many(v)
    }
}

/// Declarative metadata of a repository package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMeta {
    #[serde(default, alias = "mainProgram")]
    pub main_program: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: LicenseList,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Marker accepted in the `type` field of a repository package object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageTag {
    #[default]
    Package,
}

/// A package as exposed by the repository. Only declarative fields; reading one never builds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    #[serde(rename = "type")]
    pub tag: PackageTag,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pname: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub meta: PackageMeta,
}

/// A package object supplied directly by the caller, already evaluated elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectPackage {
    /// Explicit short name.
    #[serde(default)]
    pub pname: Option<String>,
    /// Combined name and version, e.g. `hello-2.12.1`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "mainProgram")]
    pub main_program: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub licenses: LicenseList,
    #[serde(alias = "drvPath")]
    pub drv_path: String,
    #[serde(alias = "outPath")]
    pub out_path: String,
}

/// How a caller points at an installable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageReference {
    ByName { path: Vec<String> },
    Direct(DirectPackage),
}

impl PackageReference {
    pub fn by_name(dotted: &str) -> Self {
        PackageReference::ByName {
            path: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// Builds a reference from the raw request parts. Exactly one of the two must be present;
    /// `label` is used to name the entry in errors.
    pub fn from_parts(
        package: Option<&str>,
        direct: Option<&DirectPackage>,
        label: &str,
    ) -> Result<Self> {
        match (package, direct) {
            (Some(_), Some(_)) => Err(LazyAppError::AmbiguousReference(label.to_string())),
            (None, None) => Err(LazyAppError::MissingReference(label.to_string())),
            (Some(path), None) => Ok(Self::by_name(path)),
            (None, Some(d)) => Ok(PackageReference::Direct(d.clone())),
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, PackageReference::Direct(_))
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageReference::ByName { path } => write!(f, "{}", path.join(".")),
            PackageReference::Direct(d) => write!(f, "{}", d.out_path),
        }
    }
}

/// Metadata produced once per reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    pub short_name: String,
    pub executable: String,
    pub description: String,
    pub is_license_free: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfree() -> License {
        License {
            spdx_id: None,
            short_name: Some("unfree".into()),
            free: Some(false),
        }
    }

    #[test]
    fn license_list_accepts_single_object_or_list() {
        let one: LicenseList = serde_json::from_str(r#"{"spdxId": "MIT", "free": true}"#).unwrap();
        assert_eq!(one.as_slice().len(), 1);
        let many: LicenseList =
            serde_json::from_str(r#"[{"spdx_id": "MIT"}, {"free": false}]"#).unwrap();
        assert_eq!(many.as_slice().len(), 2);
        assert!(!many.is_free());
    }

    #[test]
    fn missing_free_marker_defaults_to_free() {
        let list = LicenseList::from(vec![License::default()]);
        assert!(list.is_free());
        assert!(LicenseList::default().is_free());
        assert!(!LicenseList::from(vec![License::default(), unfree()]).is_free());
    }

    #[test]
    fn from_parts_requires_exactly_one_reference() {
        let direct = DirectPackage::default();
        assert!(matches!(
            PackageReference::from_parts(Some("hello"), Some(&direct), "hello"),
            Err(LazyAppError::AmbiguousReference(_))
        ));
        assert!(matches!(
            PackageReference::from_parts(None, None, "x"),
            Err(LazyAppError::MissingReference(_))
        ));
        let by_name = PackageReference::from_parts(Some("kdePackages.kate"), None, "kate").unwrap();
        assert_eq!(
            by_name,
            PackageReference::ByName {
                path: vec!["kdePackages".into(), "kate".into()]
            }
        );
    }
}

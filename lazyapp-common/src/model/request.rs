// lazyapp-common/src/model/request.rs
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::collision::OriginKind;
use super::package::{DirectPackage, PackageReference};
use crate::error::{LazyAppError, Result};

fn default_true() -> bool {
    true
}

/// Caller-supplied knobs for a single application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOptions {
    #[serde(default)]
    pub executable: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Absolute path, or an icon name to look up in the theme.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default = "default_true")]
    pub create_terminal_command: bool,
    #[serde(default)]
    pub allow_unfree: bool,
    #[serde(default)]
    pub create_persistence_root: bool,
    /// Registry to fetch from at launch time; falls back to the configured default.
    #[serde(default)]
    pub repository_ref: Option<String>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            executable: None,
            display_name: None,
            description: None,
            icon: None,
            categories: BTreeSet::new(),
            create_terminal_command: true,
            allow_unfree: false,
            create_persistence_root: false,
            repository_ref: None,
        }
    }
}

/// One entry of a batch, as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRequest {
    /// Dotted path into the package repository.
    #[serde(default)]
    pub package: Option<String>,
    /// Already-evaluated package object.
    #[serde(default)]
    pub direct: Option<DirectPackage>,
    /// Identifier override.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub options: AppOptions,
}

impl AppRequest {
    pub fn by_name(path: impl Into<String>) -> Self {
        Self {
            package: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn direct(package: DirectPackage) -> Self {
        Self {
            direct: Some(package),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.options.executable = Some(executable.into());
        self
    }

    /// Best available human label for error messages, before anything is resolved.
    pub fn label(&self) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }
        if let Some(path) = &self.package {
            return path.clone();
        }
        self.direct
            .as_ref()
            .and_then(|d| d.pname.clone().or_else(|| d.name.clone()))
            .unwrap_or_else(|| "<unnamed>".to_string())
    }

    pub fn reference(&self) -> Result<PackageReference> {
        PackageReference::from_parts(
            self.package.as_deref(),
            self.direct.as_ref(),
            &self.label(),
        )
    }

    pub fn origin(&self, reference: &PackageReference) -> OriginKind {
        if self.id.is_some() {
            OriginKind::Override
        } else if reference.is_direct() {
            OriginKind::DirectReference
        } else {
            OriginKind::NameReference
        }
    }
}

/// Either a bare dotted path or a full table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppEntry {
    Name(String),
    Detailed(AppRequest),
}

impl From<AppEntry> for AppRequest {
    fn from(entry: AppEntry) -> Self {
        match entry {
            AppEntry::Name(path) => AppRequest::by_name(path),
            AppEntry::Detailed(request) => request,
        }
    }
}

const MANIFEST_KEYS: &[&str] = &["apps", "app"];

/// Keys accepted in a request table. The options are flattened, so serde would otherwise
/// drop a misspelled key without a word.
const REQUEST_KEYS: &[&str] = &[
    "package",
    "direct",
    "id",
    "executable",
    "display_name",
    "description",
    "icon",
    "categories",
    "create_terminal_command",
    "allow_unfree",
    "create_persistence_root",
    "repository_ref",
];

fn reject_unknown_keys(table: &toml::Table, allowed: &[&str], location: &str) -> Result<()> {
    match table.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(LazyAppError::Manifest(format!(
            "Unknown key '{key}' in {location}"
        ))),
        None => Ok(()),
    }
}

fn check_request_tables(doc: &toml::Table, section: &str) -> Result<()> {
    let Some(toml::Value::Array(entries)) = doc.get(section) else {
        return Ok(());
    };
    for (idx, entry) in entries.iter().enumerate() {
        if let toml::Value::Table(table) = entry {
            reject_unknown_keys(table, REQUEST_KEYS, &format!("{section}[{idx}]"))?;
        }
    }
    Ok(())
}

/// A batch manifest: `apps = [...]` and/or `[[app]]` tables, in that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub apps: Vec<AppEntry>,
    #[serde(default)]
    pub app: Vec<AppRequest>,
}

impl Manifest {
    /// Parses a manifest, rejecting any key it does not know.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let doc: toml::Table = raw.parse()?;
        reject_unknown_keys(&doc, MANIFEST_KEYS, "manifest")?;
        check_request_tables(&doc, "apps")?;
        check_request_tables(&doc, "app")?;
        Ok(toml::Value::Table(doc).try_into()?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading manifest from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| {
            LazyAppError::Manifest(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn into_requests(self) -> Vec<AppRequest> {
        self.apps
            .into_iter()
            .map(AppRequest::from)
            .chain(self.app)
            .collect()
    }
}

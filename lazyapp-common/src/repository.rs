// lazyapp-common/src/repository.rs
// Read-only package repository: a tree of nested package sets keyed by path segment.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{LazyAppError, Result};
use crate::model::package::PackageEntry;

/// A node is either a package (an object with `"type": "package"`) or a nested set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryNode {
    Package(PackageEntry),
    Set(BTreeMap<String, RepositoryNode>),
}

#[derive(Debug, Clone, Default)]
pub struct Repository {
    root: BTreeMap<String, RepositoryNode>,
}

impl Repository {
    /// Parses the JSON tree. Errors name the dotted path of the offending node.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            LazyAppError::Repository(format!("Failed to parse repository data: {e}"))
        })?;
        let Value::Object(map) = value else {
            return Err(LazyAppError::Repository(
                "Repository data must be a JSON object".to_string(),
            ));
        };
        let repo = Self {
            root: parse_level(map, "")?,
        };
        debug!("Parsed repository with {} packages.", repo.len());
        Ok(repo)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading package repository from {}", path.display());
        if !path.is_file() {
            return Err(LazyAppError::Repository(format!(
                "Repository file {} does not exist",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Walks `path` segment by segment. A miss reports every segment visited, including the one
    /// that failed.
    pub fn lookup(&self, path: &[String]) -> Result<&PackageEntry> {
        let not_found = |checked: &[String]| LazyAppError::PackageNotFound {
            path: path.to_vec(),
            checked: checked.to_vec(),
        };

        let mut level = &self.root;
        for (idx, segment) in path.iter().enumerate() {
            let checked = &path[..=idx];
            let is_last = idx + 1 == path.len();
            match level.get(segment) {
                Some(RepositoryNode::Package(entry)) if is_last => return Ok(entry),
                Some(RepositoryNode::Set(children)) if !is_last => level = children,
                _ => {
                    debug!("Repository lookup for '{}' stopped at '{}'", path.join("."), segment);
                    return Err(not_found(checked));
                }
            }
        }
        Err(not_found(&[]))
    }

    /// Number of packages in the whole tree.
    pub fn len(&self) -> usize {
        fn count(level: &BTreeMap<String, RepositoryNode>) -> usize {
            level
                .values()
                .map(|node| match node {
                    RepositoryNode::Package(_) => 1,
                    RepositoryNode::Set(children) => count(children),
                })
                .sum()
        }
        count(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dotted paths of every package, in sorted order.
    pub fn package_paths(&self) -> Vec<String> {
        fn walk(level: &BTreeMap<String, RepositoryNode>, prefix: &str, out: &mut Vec<String>) {
            for (key, node) in level {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                match node {
                    RepositoryNode::Package(_) => out.push(path),
                    RepositoryNode::Set(children) => walk(children, &path, out),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.root, "", &mut out);
        out
    }
}

fn parse_level(
    map: Map<String, Value>,
    prefix: &str,
) -> Result<BTreeMap<String, RepositoryNode>> {
    let mut level = BTreeMap::new();
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let node = match value {
            Value::Object(obj) if obj.get("type").and_then(Value::as_str) == Some("package") => {
                let entry = serde_json::from_value(Value::Object(obj)).map_err(|e| {
                    LazyAppError::Repository(format!("Invalid package '{path}': {e}"))
                })?;
                RepositoryNode::Package(entry)
            }
            Value::Object(obj) => RepositoryNode::Set(parse_level(obj, &path)?),
            other => {
                return Err(LazyAppError::Repository(format!(
                    "Invalid repository node '{path}': expected a package or a package set, found {}",
                    json_kind(&other)
                )))
            }
        };
        level.insert(key, node);
    }
    Ok(level)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// lazyapp-common/src/model/collision.rs
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a batch entry's naming came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginKind {
    NameReference,
    DirectReference,
    Override,
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OriginKind::NameReference => "name-reference",
            OriginKind::DirectReference => "direct-reference",
            OriginKind::Override => "override",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionMember {
    pub identifier: String,
    pub origin: OriginKind,
}

/// Terminal commands claimed by more than one batch entry. Members keep batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub groups: BTreeMap<String, Vec<CollisionMember>>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, terminal_command: &str) -> Option<&[CollisionMember]> {
        self.groups.get(terminal_command).map(Vec::as_slice)
    }

    /// Total number of entries involved across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (command, members) in &self.groups {
            if !first {
                writeln!(f)?;
            }
            first = false;
            let listed: Vec<String> = members
                .iter()
                .map(|m| format!("'{}' ({})", m.identifier, m.origin))
                .collect();
            write!(f, "  '{}' is claimed by {}", command, listed.join(", "))?;
        }
        Ok(())
    }
}

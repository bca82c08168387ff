// lazyapp-core/src/check/collision.rs
use std::collections::BTreeMap;

use lazyapp_common::error::Result;
use lazyapp_common::model::collision::{CollisionMember, CollisionReport, OriginKind};
use lazyapp_common::model::package::PackageReference;
use lazyapp_common::model::request::AppRequest;
use lazyapp_common::repository::Repository;
use tracing::debug;

use super::identifier::validate_identifier;
use crate::build::assemble::choose_identifier;
use crate::resolve::metadata::{resolve_metadata, MetadataOverrides};

/// Just enough of a batch entry to work out its terminal command.
#[derive(Debug, Clone)]
pub struct PreDescriptor {
    pub identifier: String,
    pub reference: PackageReference,
    pub executable_override: Option<String>,
    pub create_terminal_command: bool,
    pub origin: OriginKind,
}

impl PreDescriptor {
    /// Fails on a malformed identifier before anything is looked up.
    pub fn from_request(request: &AppRequest) -> Result<Self> {
        let reference = request.reference()?;
        let identifier = choose_identifier(&reference, request.id.as_deref());
        validate_identifier(&identifier)?;
        Ok(Self {
            identifier,
            origin: request.origin(&reference),
            executable_override: request.options.executable.clone(),
            create_terminal_command: request.options.create_terminal_command,
            reference,
        })
    }

    /// Lowercased executable, resolving metadata only when there is no override.
    pub fn terminal_command(&self, repository: &Repository) -> Result<String> {
        let executable = match &self.executable_override {
            Some(exec) => exec.clone(),
            None => {
                resolve_metadata(&self.reference, repository, MetadataOverrides::default())?
                    .executable
            }
        };
        Ok(executable.to_lowercase())
    }
}

/// Groups entries by terminal command and reports every group with more than one member.
/// Entries that do not create a terminal command are ignored.
pub fn detect_collisions(
    entries: &[PreDescriptor],
    repository: &Repository,
) -> Result<Option<CollisionReport>> {
    let mut by_command: BTreeMap<String, Vec<CollisionMember>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| e.create_terminal_command) {
        let command = entry.terminal_command(repository)?;
        by_command.entry(command).or_default().push(CollisionMember {
            identifier: entry.identifier.clone(),
            origin: entry.origin,
        });
    }

    let report = CollisionReport {
        groups: by_command
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .collect(),
    };

    if report.is_empty() {
        debug!("No terminal command collisions among {} entries", entries.len());
        Ok(None)
    } else {
        debug!("Found {} colliding terminal commands", report.groups.len());
        Ok(Some(report))
    }
}

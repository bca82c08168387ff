// lazyapp-common/src/model/descriptor.rs
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The runtime method used to obtain the real application bits on first launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AcquisitionStrategy {
    /// Resolve the package by name against a named registry at launch time.
    RegistryFetch {
        repository_ref: String,
        package_path: String,
    },
    /// Realize a previously captured build recipe / output path pair at launch time.
    StoreRealize {
        build_recipe_path: String,
        output_path: String,
    },
}

impl AcquisitionStrategy {
    pub fn kind_str(&self) -> &'static str {
        match self {
            AcquisitionStrategy::RegistryFetch { .. } => "registry_fetch",
            AcquisitionStrategy::StoreRealize { .. } => "store_realize",
        }
    }
}

/// Fully resolved, ready-to-emit record describing one deferred application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    pub identifier: String,
    pub executable: String,
    pub terminal_command: String,
    pub display_name: String,
    pub description: String,
    pub icon_path: String,
    pub categories: BTreeSet<String>,
    pub create_terminal_command: bool,
    pub acquisition_strategy: AcquisitionStrategy,
    pub requires_elevated_evaluation: bool,
    pub create_persistence_root: bool,
}

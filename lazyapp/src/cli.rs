// lazyapp/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use lazyapp_common::error::Result;
use lazyapp_common::Config;

// Module declarations
pub mod build;
pub mod check;
pub mod info;
pub mod search;
pub mod validate;

use crate::cli::build::BuildArgs;
use crate::cli::check::CheckArgs;
use crate::cli::info::InfoArgs;
use crate::cli::search::Search;
use crate::cli::validate::ValidateArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "lazyapp", bin_name = "lazyapp")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Package repository JSON file (overrides LAZYAPP_REPOSITORY)
    #[arg(long, global = true, value_name = "FILE")]
    pub repository: Option<PathBuf>,

    /// Icon theme directory (overrides LAZYAPP_ICON_THEME_ROOT)
    #[arg(long, global = true, value_name = "DIR")]
    pub icon_theme_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    /// Applies the command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(repo) = &self.repository {
            config.repository_file = Some(repo.clone());
        }
        if let Some(root) = &self.icon_theme_root {
            config.icon_theme_root = Some(root.clone());
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build descriptors for every app in a manifest
    Build(BuildArgs),
    /// Check a manifest for terminal command collisions
    Check(CheckArgs),
    /// Show the descriptor for a single package
    Info(InfoArgs),
    /// Validate identifiers
    Validate(ValidateArgs),
    /// Search the package repository
    Search(Search),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Build(command) => command.run(config),
            Self::Check(command) => command.run(config),
            Self::Info(command) => command.run(config),
            Self::Validate(command) => command.run(),
            Self::Search(command) => command.run(config),
        }
    }
}

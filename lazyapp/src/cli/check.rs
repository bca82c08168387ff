// lazyapp/src/cli/check.rs
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use lazyapp_common::error::Result;
use lazyapp_common::model::Manifest;
use lazyapp_common::{Config, Repository};
use lazyapp_core::check_batch;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Manifest listing the apps to check (TOML)
    pub manifest: PathBuf,
}

impl CheckArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let requests = Manifest::load(&self.manifest)?.into_requests();
        let repository = Repository::load(&config.repository_path())?;

        check_batch(&requests, &repository)?;
        println!(
            "{} {} apps, no terminal command collisions",
            "Checked".green().bold(),
            requests.len()
        );
        Ok(())
    }
}

// lazyapp/src/cli/build.rs
use std::fs;
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use lazyapp_common::error::Result;
use lazyapp_common::model::Manifest;
use lazyapp_common::{Config, Repository};
use lazyapp_core::build_batch;
use tracing::instrument;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Manifest listing the apps to build (TOML)
    pub manifest: PathBuf,

    /// Write the descriptors here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl BuildArgs {
    #[instrument(skip(self, config), fields(manifest = %self.manifest.display()))]
    pub fn run(&self, config: &Config) -> Result<()> {
        let requests = Manifest::load(&self.manifest)?.into_requests();
        let repository = Repository::load(&config.repository_path())?;

        let descriptors = build_batch(&requests, &repository, config)?;
        let rendered = serde_json::to_string_pretty(&descriptors)?;

        match &self.output {
            Some(path) => {
                fs::write(path, format!("{rendered}\n"))?;
                eprintln!(
                    "{} {} descriptors to {}",
                    "Wrote".green().bold(),
                    descriptors.len(),
                    path.display()
                );
            }
            None => println!("{rendered}"),
        }
        Ok(())
    }
}

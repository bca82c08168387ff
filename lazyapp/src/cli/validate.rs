// lazyapp/src/cli/validate.rs
use clap::Args;
use colored::Colorize;
use lazyapp_common::error::Result;
use lazyapp_core::validate_identifier;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(required = true)]
    pub identifiers: Vec<String>,
}

impl ValidateArgs {
    /// Reports every identifier, then fails with the first error if any was invalid.
    pub fn run(&self) -> Result<()> {
        let mut first_err = None;
        for id in &self.identifiers {
            match validate_identifier(id) {
                Ok(_) => println!("{} {}", "✓".green().bold(), id),
                Err(e) => {
                    println!("{} {}", "✗".red().bold(), e);
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

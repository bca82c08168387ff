// lazyapp/src/cli/search.rs
use clap::Args;
use colored::Colorize;
use lazyapp_common::error::Result;
use lazyapp_common::{Config, Repository};
use prettytable::{format, Cell, Row, Table};

#[derive(Args, Debug)]
pub struct Search {
    pub query: String,
}

impl Search {
    pub fn run(&self, config: &Config) -> Result<()> {
        tracing::debug!("Searching for packages matching: {}", self.query);
        let repository = Repository::load(&config.repository_path())?;
        let query_lower = self.query.to_lowercase();

        let matches: Vec<String> = repository
            .package_paths()
            .into_iter()
            .filter(|path| path.to_lowercase().contains(&query_lower))
            .collect();

        if matches.is_empty() {
            println!("{}", format!("No packages matching \"{}\"", self.query).yellow());
            return Ok(());
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Package").style_spec("b"),
            Cell::new("Command").style_spec("b"),
            Cell::new("Description").style_spec("b"),
        ]));
        for path in &matches {
            let segments: Vec<String> = path.split('.').map(str::to_string).collect();
            let entry = repository.lookup(&segments)?;
            let command = entry
                .meta
                .main_program
                .clone()
                .or_else(|| segments.last().cloned())
                .unwrap_or_default();
            table.add_row(Row::new(vec![
                Cell::new(path).style_spec("Fg"),
                Cell::new(&command),
                Cell::new(entry.meta.description.as_deref().unwrap_or("")),
            ]));
        }
        table.printstd();
        println!("{} {} packages", "Found".bold(), matches.len());
        Ok(())
    }
}

// lazyapp/src/cli/info.rs
use clap::Args;
use colored::Colorize;
use lazyapp_common::error::Result;
use lazyapp_common::model::{AcquisitionStrategy, AppOptions, AppRequest, LaunchDescriptor};
use lazyapp_common::{Config, Repository};
use lazyapp_core::assemble;

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Dotted package path, e.g. `obs-studio` or `kdePackages.kate`
    pub package: String,

    #[arg(long, help = "Identifier override")]
    pub id: Option<String>,
    #[arg(long = "exec", help = "Executable override")]
    pub executable: Option<String>,
    #[arg(long)]
    pub display_name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, help = "Absolute icon path or icon name")]
    pub icon: Option<String>,
    #[arg(long = "category")]
    pub categories: Vec<String>,
    #[arg(long, help = "Do not create a terminal command")]
    pub no_terminal_command: bool,
    #[arg(long)]
    pub allow_unfree: bool,
    #[arg(long, help = "Protect the fetched package from garbage collection")]
    pub persist: bool,
    #[arg(long)]
    pub repository_ref: Option<String>,

    /// Print the descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

impl InfoArgs {
    fn to_request(&self) -> AppRequest {
        AppRequest {
            package: Some(self.package.clone()),
            direct: None,
            id: self.id.clone(),
            options: AppOptions {
                executable: self.executable.clone(),
                display_name: self.display_name.clone(),
                description: self.description.clone(),
                icon: self.icon.clone(),
                categories: self.categories.iter().cloned().collect(),
                create_terminal_command: !self.no_terminal_command,
                allow_unfree: self.allow_unfree,
                create_persistence_root: self.persist,
                repository_ref: self.repository_ref.clone(),
            },
        }
    }

    pub fn run(&self, config: &Config) -> Result<()> {
        tracing::debug!("Building descriptor for: {}", self.package);
        let repository = Repository::load(&config.repository_path())?;
        let descriptor = assemble(&self.to_request(), &repository, config)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        } else {
            print_descriptor(&descriptor);
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn print_descriptor(d: &LaunchDescriptor) {
    println!("{}", d.display_name.green().bold());
    println!("  {}", d.description);
    println!();
    println!("{:<18} {}", "Identifier:".bold(), d.identifier);
    println!("{:<18} {}", "Executable:".bold(), d.executable);
    if d.create_terminal_command {
        println!("{:<18} {}", "Command:".bold(), d.terminal_command.cyan());
    } else {
        println!("{:<18} {}", "Command:".bold(), "(none)".dimmed());
    }
    println!("{:<18} {}", "Icon:".bold(), d.icon_path);
    if !d.categories.is_empty() {
        let categories: Vec<&str> = d.categories.iter().map(String::as_str).collect();
        println!("{:<18} {}", "Categories:".bold(), categories.join(", "));
    }
    match &d.acquisition_strategy {
        AcquisitionStrategy::RegistryFetch {
            repository_ref,
            package_path,
        } => println!(
            "{:<18} fetch {}#{}",
            "Acquisition:".bold(),
            repository_ref,
            package_path
        ),
        AcquisitionStrategy::StoreRealize {
            build_recipe_path,
            output_path,
        } => println!(
            "{:<18} realize {} -> {}",
            "Acquisition:".bold(),
            build_recipe_path,
            output_path
        ),
    }
    println!(
        "{:<18} {}",
        "Elevated eval:".bold(),
        if d.requires_elevated_evaluation {
            "yes".yellow().to_string()
        } else {
            "no".to_string()
        }
    );
    println!(
        "{:<18} {}",
        "Persistent:".bold(),
        yes_no(d.create_persistence_root)
    );
}

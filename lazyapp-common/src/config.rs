// lazyapp-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use super::error::{LazyAppError, Result};

pub const DEFAULT_REPOSITORY_REF: &str = "default-registry";
pub const DEFAULT_ICON_THEME: &str = "hicolor";
const REPOSITORY_FILENAME: &str = "repository.json";

/// Pipeline configuration. Built once and passed explicitly to everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub lazyapp_root: PathBuf,
    pub repository_file: Option<PathBuf>,
    pub icon_theme: String,
    pub icon_theme_root: Option<PathBuf>,
    pub default_repository_ref: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading lazyapp configuration");

        let data_dir = BaseDirs::new().map(|dirs| dirs.data_dir().to_path_buf());

        let lazyapp_root = match env::var("LAZYAPP_ROOT").ok().filter(|s| !s.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => data_dir
                .as_ref()
                .map(|d| d.join("lazyapp"))
                .ok_or_else(|| {
                    LazyAppError::Config(
                        "LAZYAPP_ROOT is not set and no user data directory could be determined"
                            .to_string(),
                    )
                })?,
        };
        debug!("Effective LAZYAPP_ROOT set to: {}", lazyapp_root.display());

        let repository_file = env::var("LAZYAPP_REPOSITORY")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let icon_theme = env::var("LAZYAPP_ICON_THEME")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON_THEME.to_string());

        // An explicit theme root is taken as given; the derived one only if it exists.
        let icon_theme_root = match env::var("LAZYAPP_ICON_THEME_ROOT")
            .ok()
            .filter(|s| !s.is_empty())
        {
            Some(root) => Some(PathBuf::from(root)),
            None => data_dir
                .map(|d| d.join("icons").join(&icon_theme))
                .filter(|p| p.is_dir()),
        };
        match &icon_theme_root {
            Some(root) => debug!("Icon theme '{}' at {}", icon_theme, root.display()),
            None => debug!("No icon theme root found for theme '{}'", icon_theme),
        }

        let default_repository_ref = env::var("LAZYAPP_REPOSITORY_REF")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_REPOSITORY_REF.to_string());

        debug!("Configuration loaded successfully.");
        Ok(Self {
            lazyapp_root,
            repository_file,
            icon_theme,
            icon_theme_root,
            default_repository_ref,
        })
    }

    /// A configuration with no environment lookups.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            lazyapp_root: root.into(),
            repository_file: None,
            icon_theme: DEFAULT_ICON_THEME.to_string(),
            icon_theme_root: None,
            default_repository_ref: DEFAULT_REPOSITORY_REF.to_string(),
        }
    }

    pub fn repository_path(&self) -> PathBuf {
        self.repository_file
            .clone()
            .unwrap_or_else(|| self.lazyapp_root.join(REPOSITORY_FILENAME))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.lazyapp_root.join("logs")
    }

    pub fn icon_theme_root(&self) -> Option<&Path> {
        self.icon_theme_root.as_deref()
    }
}

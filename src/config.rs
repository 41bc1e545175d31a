//! tasksync configuration at ~/.config/tasksync/config.toml.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Defaults for the sync command; command-line flags override file values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Calendar that receives task events.
    pub calendar: Option<String>,
    /// Task source used when --source is not given.
    pub source: Option<String>,
    /// Org file read by the orgmode source.
    pub org_file: Option<PathBuf>,
    /// Default filter terms.
    #[serde(default)]
    pub filter: Vec<String>,
    /// Cancel events whose task disappeared (bounded by the fetch window).
    #[serde(default)]
    pub prune_orphans: bool,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("tasksync")
            .join("config.toml"))
    }

    /// Load the config file. A missing file gets a commented template
    /// written in its place and yields the defaults.
    pub fn load() -> Result<Config> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::write_template(&path)?;
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    fn write_template(path: &Path) -> Result<()> {
        let contents = "\
# tasksync configuration

# Calendar that receives task events:
# calendar = \"To-do\"

# Default task source (taskwarrior or orgmode):
# source = \"taskwarrior\"

# Org file read by the orgmode source:
# org_file = \"/home/you/org/inbox.org\"

# Default filter terms:
# filter = [\"+PENDING\"]

# Cancel events whose task no longer exists (within the fetch window):
# prune_orphans = false
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config template to {}", path.display()))?;

        Ok(())
    }
}

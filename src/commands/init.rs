//! @acp:module "Init Command"
//! @acp:summary "Write a default configuration file"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::{Config, DEFAULT_CONFIG_PATH};

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Config file to create
    pub path: PathBuf,
    /// Overwrite an existing config
    pub force: bool,
    /// Bound the cache to this many entries
    pub capacity: Option<usize>,
    /// Snapshot file for the cache
    pub snapshot: Option<PathBuf>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
            force: false,
            capacity: None,
            snapshot: None,
        }
    }
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.path.exists() && !options.force {
        eprintln!(
            "{} {} already exists. Use --force to overwrite.",
            style("✗").red(),
            options.path.display()
        );
        anyhow::bail!("Config already exists");
    }

    let mut config = Config::default();
    config.cache.capacity = options.capacity;
    config.cache.snapshot = options.snapshot;
    config.validate()?;
    config.save(&options.path)?;

    println!(
        "{} Created {}",
        style("✓").green(),
        options.path.display()
    );
    Ok(())
}

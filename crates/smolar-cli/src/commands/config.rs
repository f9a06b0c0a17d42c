//! Effective configuration display

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::commands::Command;
use crate::config::Config;
use crate::utils::print_success;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Write the effective configuration to this path instead of printing it
    #[arg(long)]
    pub write: Option<PathBuf>,
}

impl Command for ConfigCommand {
    fn execute(&self, config: &Config, json_output: bool) -> Result<()> {
        debug!("Executing config command: {:?}", self);

        if let Some(path) = &self.write {
            config.save(path)?;
            print_success(&format!("Configuration written to {}", path.display()));
            return Ok(());
        }

        if json_output {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            print!("{}", config.to_toml()?);
        }
        Ok(())
    }
}

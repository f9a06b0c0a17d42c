//! Command implementations for Smolar CLI

pub mod bench;
pub mod config;
pub mod demo;
pub mod info;

use anyhow::Result;

/// Trait for CLI command execution
pub trait Command {
    /// Execute the command
    fn execute(&self, config: &crate::config::Config, json_output: bool) -> Result<()>;
}

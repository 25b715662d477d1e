//! Config Command
//!
//! Manage munassist configuration.
//!
//! Usage:
//!   munassist config show [-f json]
//!   munassist config path
//!   munassist config init [-g] [--force]

use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::{MunError, Result};

/// Print the effective configuration
pub fn show(config: &Config, format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "toml" | "text" => false,
        other => {
            return Err(MunError::InvalidInput(format!(
                "Unknown format '{}'. Valid values: toml, json",
                other
            )));
        }
    };
    println!("{}", ConfigLoader::render(config, as_json)?);
    Ok(())
}

/// Show configuration paths
pub fn path() {
    let out = Output::new();
    out.header("Configuration paths");

    match ConfigLoader::global_config_path() {
        Some(global) => out.field("Global", &describe(&global)),
        None => out.field("Global", "(not available)"),
    }
    out.field("Project", &describe(&ConfigLoader::project_config_path()));
}

fn describe(path: &std::path::Path) -> String {
    let marker = if path.exists() { "✓" } else { "✗" };
    format!("{} {}", marker, path.display())
}

/// Create a default config file
pub fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };
    let scope = if global { "global" } else { "project" };
    Output::new().success(&format!("Initialized {} configuration", scope));
    println!("  Config:    {}", path.display());
    Ok(())
}

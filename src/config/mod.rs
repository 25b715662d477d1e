//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (`<config_dir>/munassist/config.toml`)
//! 3. Project config (`.munassist/config.toml`)
//! 4. Environment variables (`MUNASSIST_*`)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;

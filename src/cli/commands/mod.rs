pub mod catalog;
pub mod config;
pub mod generate;
pub mod key;

use std::path::Path;

use crate::config::{Config, ConfigLoader};
use crate::types::Result;

/// Explicit file when given, otherwise the full resolution chain
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

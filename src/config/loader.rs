//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (`<config_dir>/munassist/config.toml`)
//! 3. Project config (`.munassist/config.toml`)
//! 4. Environment variables (`MUNASSIST_*`, `__` separates sections)

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{MunError, Result};

const ENV_PREFIX: &str = "MUNASSIST_";
const CONFIG_FILE: &str = "config.toml";
const PROJECT_DIR: &str = ".munassist";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_layers(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Resolution chain with explicit file locations
    pub fn load_layers(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // MUNASSIST_INFERENCE__MAX_TOKENS -> inference.max_tokens
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| MunError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| MunError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Platform config directory for munassist
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "munassist").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join(CONFIG_FILE)
    }

    pub fn project_dir() -> PathBuf {
        PathBuf::from(PROJECT_DIR)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render a configuration as pretty JSON or TOML
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| MunError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            MunError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::init_in(&global_dir, force)
    }

    /// Initialize project configuration in the working directory
    pub fn init_project(force: bool) -> Result<PathBuf> {
        Self::init_in(&Self::project_dir(), force)
    }

    /// Write the default config file into `dir`; existing files are kept
    /// unless `force` is set. Returns the file path.
    pub fn init_in(dir: &Path, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config_file())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn default_config_file() -> String {
        r#"# munassist Configuration
# Project settings in .munassist/config.toml override the global file.
# The API key is read from HUGGINGFACE_API_KEY unless set here.

version = "1.0"

[inference]
base_url = "https://api-inference.huggingface.co/models/"
model = "meta-llama/Llama-2-7b-chat-hf"
max_tokens = 800
temperature = 0.7
request_timeout_secs = 30
# api_key = "hf_..."

[retry]
max_attempts = 4
base_backoff_ms = 1000
jitter_step_ms = 200

[delegation]
country = "India"
committee = "UNSC"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use tempfile::TempDir;

    fn load_in_jail(global: Option<&Path>, project: &Path) -> figment::error::Result<Config> {
        ConfigLoader::load_layers(global, project).map_err(|e| e.to_string().into())
    }

    #[test]
    fn test_load_defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = load_in_jail(None, Path::new("absent.toml"))?;
            assert_eq!(config.version, "1.0");
            assert_eq!(config.retry.base_backoff_ms, 1000);
            Ok(())
        });
    }

    #[test]
    fn test_project_overrides_global() {
        Jail::expect_with(|jail| {
            jail.create_file("global.toml", "[inference]\nmodel = \"gpt2\"\nmax_tokens = 256\n")?;
            jail.create_file("project.toml", "[inference]\nmodel = \"google/flan-t5-large\"\n")?;

            let config = load_in_jail(Some(Path::new("global.toml")), Path::new("project.toml"))?;
            assert_eq!(config.inference.model, "google/flan-t5-large");
            assert_eq!(config.inference.max_tokens, 256);
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("MUNASSIST_RETRY__JITTER_STEP_MS", "50");
            jail.set_env("MUNASSIST_INFERENCE__MODEL", "gpt2");

            let config = load_in_jail(None, Path::new("absent.toml"))?;
            assert_eq!(config.retry.jitter_step_ms, 50);
            assert_eq!(config.inference.model, "gpt2");
            Ok(())
        });
    }

    #[test]
    fn test_env_beats_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file("project.toml", "[delegation]\ncountry = \"Japan\"\n")?;
            jail.set_env("MUNASSIST_DELEGATION__COUNTRY", "Kenya");

            let config = load_in_jail(None, Path::new("project.toml"))?;
            assert_eq!(config.delegation.country, "Kenya");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("MUNASSIST_RETRY__MAX_ATTEMPTS", "0");
            assert!(ConfigLoader::load_layers(None, Path::new("absent.toml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[inference]\ntemperature = 3.0\n").unwrap();
        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(MunError::Config(_))
        ));
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(".munassist");

        let path = ConfigLoader::init_in(&dir, false).unwrap();
        assert!(path.exists());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.delegation.country, "India");
        assert_eq!(config.retry.jitter_step_ms, 200);
    }

    #[test]
    fn test_init_keeps_existing_unless_forced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "version = \"custom\"\n").unwrap();

        ConfigLoader::init_in(temp_dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");

        ConfigLoader::init_in(temp_dir.path(), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[retry]"));
    }

    #[test]
    fn test_render_formats() {
        let config = Config::default();
        let toml = ConfigLoader::render(&config, false).unwrap();
        assert!(toml.contains("[inference]"));
        let json = ConfigLoader::render(&config, true).unwrap();
        assert!(json.contains("\"max_attempts\": 4"));
    }
}

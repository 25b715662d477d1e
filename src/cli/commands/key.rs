//! Check-Key Command
//!
//! Structural check of the configured access token. Nothing is sent.

use secrecy::{ExposeSecret, SecretString};

use crate::ai::credential;
use crate::cli::ui::Output;
use crate::config::Config;
use crate::constants::inference::API_KEY_ENV;
use crate::types::{ErrorClassifier, Result};

pub fn run(api_key: Option<String>, config: &Config) -> Result<()> {
    let out = Output::new();

    let Some(key) = api_key
        .map(SecretString::from)
        .or_else(|| config.inference.api_key())
    else {
        out.info(&format!(
            "No API key found. Pass --api-key or set {}.",
            API_KEY_ENV
        ));
        return Err(ErrorClassifier::invalid_credential().into());
    };

    if credential::validate_secret(&key) {
        out.success(&format!(
            "API key format looks valid ({} characters)",
            key.expose_secret().len()
        ));
        Ok(())
    } else {
        Err(ErrorClassifier::invalid_credential().into())
    }
}

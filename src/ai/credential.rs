//! Credential Validation
//!
//! Structural check for Hugging Face access tokens. Runs on every pipeline
//! call before any request is built; nothing here touches the network.

use secrecy::{ExposeSecret, SecretString};

use crate::constants::credential::{MIN_TOKEN_LEN_EXCLUSIVE, TOKEN_PREFIX};

/// Check a raw credential against the token format (`hf_` prefix, length > 10)
pub fn validate(credential: &str) -> bool {
    !credential.is_empty()
        && credential.starts_with(TOKEN_PREFIX)
        && credential.len() > MIN_TOKEN_LEN_EXCLUSIVE
}

/// Same check for a credential held as a secret
pub fn validate_secret(credential: &SecretString) -> bool {
    validate(credential.expose_secret())
}

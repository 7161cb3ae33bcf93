//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults point at the production API.
//!
//! - `THAMBILI_API_BASE_URL` - Base URL of the storefront API
//!   (default: `https://shop.thambili.lk`)
//! - `THAMBILI_STATE_DIR` - Directory for the durable session file
//!   (default: `$HOME/.thambili`, or `./.thambili` without a home directory)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default API origin when `THAMBILI_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "https://shop.thambili.lk";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to an unusable value.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the storefront API.
    pub base_url: Url,
    /// Directory holding the durable session file.
    pub state_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `THAMBILI_API_BASE_URL` is set but is not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw_base_url = get_env_or_default("THAMBILI_API_BASE_URL", DEFAULT_API_BASE_URL);
        let base_url = Url::parse(&raw_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("THAMBILI_API_BASE_URL".to_string(), e.to_string())
        })?;

        let state_dir = get_optional_env("THAMBILI_STATE_DIR")
            .map_or_else(default_state_dir, PathBuf::from);

        Ok(Self {
            base_url,
            state_dir,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// State directory under the user's home, falling back to the working
/// directory when `HOME` is unset.
fn default_state_dir() -> PathBuf {
    get_optional_env("HOME").map_or_else(
        || PathBuf::from(".thambili"),
        |home| PathBuf::from(home).join(".thambili"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_is_valid() {
        let url = Url::parse(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_default_state_dir_is_hidden_directory() {
        let dir = default_state_dir();
        assert!(dir.ends_with(".thambili"));
    }
}

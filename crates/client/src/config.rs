//! Olho Vivo API configuration

use serde::{Deserialize, Serialize};

/// Configuration for the SPTrans Olho Vivo API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OlhoVivoConfig {
    /// Base URL for the Olho Vivo API (default: <https://api.olhovivo.sptrans.com.br/v2.1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token issued by SPTrans; sent only to the login endpoint
    /// and redacted everywhere it appears in diagnostics
    #[serde(default)]
    pub token: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.olhovivo.sptrans.com.br/v2.1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for OlhoVivoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OlhoVivoConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            token: "test-token".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.token.is_empty() {
            return Err("token must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

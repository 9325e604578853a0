//! PTV client configuration

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::PtvError;
use crate::signer::Credentials;

/// Configuration for the PTV Timetable API client
#[derive(Clone, Serialize, Deserialize)]
pub struct PtvConfig {
    /// Base URL of the Timetable API host (scheme and authority only)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Developer ID issued by PTV
    #[serde(default)]
    pub developer_id: Option<String>,

    /// Secret API key issued by PTV (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

fn default_base_url() -> String {
    "https://timetableapi.ptv.vic.gov.au".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("ptv_client/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for PtvConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            developer_id: None,
            api_key: None,
        }
    }
}

impl fmt::Debug for PtvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtvConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("developer_id", &self.developer_id)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

impl PtvConfig {
    /// Default configuration carrying the given credentials
    #[must_use]
    pub fn with_credentials(developer_id: impl fmt::Display, api_key: impl Into<String>) -> Self {
        Self {
            developer_id: Some(developer_id.to_string()),
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Self::with_credentials("1", "secret")
        }
    }

    /// Load configuration from an optional `ptv.toml` and `PTV_*` variables
    ///
    /// Environment variables override the file, e.g. `PTV_DEVELOPER_ID`,
    /// `PTV_API_KEY`, `PTV_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("ptv")
    }

    /// Like [`PtvConfig::load`], reading the file `name` (any supported format)
    pub fn load_from(name: &str) -> Result<Self, config::ConfigError> {
        Self::load_layered(name, config::Environment::with_prefix("PTV"))
    }

    fn load_layered(name: &str, env: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Get the API key as a string reference (for signing)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Build the signing credentials
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::Configuration`] if either credential is missing
    /// or empty.
    pub fn credentials(&self) -> Result<Credentials, PtvError> {
        let developer_id = self
            .developer_id
            .as_deref()
            .ok_or_else(|| PtvError::Configuration("developer_id is not set".to_string()))?;
        let api_key = self
            .api_key_str()
            .ok_or_else(|| PtvError::Configuration("api_key is not set".to_string()))?;
        Credentials::new(developer_id, api_key)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::Configuration`] if the configuration is invalid.
    pub fn validate(&self) -> Result<(), PtvError> {
        if self.base_url.trim().is_empty() {
            return Err(PtvError::Configuration(
                "base_url must not be empty".to_string(),
            ));
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| PtvError::Configuration(format!("base_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PtvError::Configuration(format!(
                "base_url must use http or https, got `{}`",
                parsed.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(PtvError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        self.credentials().map(|_| ())
    }
}

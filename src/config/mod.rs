/// Configuration management for conference-admin
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted when the config file carries no password
pub const PASSWORD_ENV: &str = "CONFERENCE_ADMIN_PASSWORD";

/// Management API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Management API base URL (e.g. "https://infinity.example.com/api/admin/")
    pub base_url: String,

    /// Administrator username
    pub username: String,

    /// Administrator password (can also be set via CONFERENCE_ADMIN_PASSWORD env var)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Accept self-signed management certificates
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base_url {}: {}", self.base_url, e))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            anyhow::bail!("base_url must use http or https: {}", self.base_url);
        }

        if self.username.is_empty() {
            anyhow::bail!("username cannot be empty");
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        Ok(())
    }

    /// Get the API password from config or environment
    pub fn password(&self) -> anyhow::Result<String> {
        self.password
            .clone()
            .or_else(|| std::env::var(PASSWORD_ENV).ok())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Management API password not found. Set {} environment variable or specify in config",
                    PASSWORD_ENV
                )
            })
    }

    /// Generate an example configuration file
    pub fn example() -> Self {
        Self {
            base_url: "https://infinity.example.com/api/admin/".to_string(),
            username: "admin".to_string(),
            password: None,
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

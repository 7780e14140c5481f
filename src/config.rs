//! Configuration management for freenom-ddns.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Portal endpoint constants.
///
/// Freenom exposes no DNS API for free-tier domains; everything goes through
/// the web frontend. The paths are relative to `base` and joined with a
/// single `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalUrls {
    /// Portal base URL.
    #[serde(default = "default_base")]
    pub base: String,

    /// Authenticated account-management page.
    #[serde(default = "default_client_area")]
    pub client_area: String,

    /// Login form endpoint.
    #[serde(default = "default_login")]
    pub login: String,
}

fn default_base() -> String {
    "https://my.freenom.com".to_string()
}

fn default_client_area() -> String {
    "clientarea.php".to_string()
}

fn default_login() -> String {
    "dologin.php".to_string()
}

impl Default for PortalUrls {
    fn default() -> Self {
        Self {
            base: default_base(),
            client_area: default_client_area(),
            login: default_login(),
        }
    }
}

impl PortalUrls {
    /// Absolute URL of the client-area page.
    pub fn client_area_url(&self) -> String {
        self.join(&self.client_area)
    }

    /// Absolute URL of the login endpoint.
    pub fn login_url(&self) -> String {
        self.join(&self.login)
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), path)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Portal endpoints.
    #[serde(default)]
    pub urls: PortalUrls,

    /// IP detection service (must answer with JSON carrying an `ip` field).
    #[serde(default = "default_ip_service")]
    pub ip_service: String,

    /// Verify the portal's TLS certificate. Off by default: the portal has
    /// a history of serving certificates that fail verification.
    #[serde(default)]
    pub verify_tls: bool,
}

fn default_ip_service() -> String {
    "https://ipinfo.io/json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: PortalUrls::default(),
            ip_service: default_ip_service(),
            verify_tls: false,
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("freenom-ddns").join("config.toml"))
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the built-in defaults.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

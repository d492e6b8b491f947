use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    pub pms: PmsConfig,
    #[serde(default)]
    pub friendly_names: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_listen_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_listen_port(),
        }
    }
}

/// Connection settings for the media server, plus the operator toggle for
/// index (BIF) thumbnails.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PmsConfig {
    #[serde(default)]
    pub ip: String,
    #[serde(default = "default_pms_port")]
    pub port: u16,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub https: bool,
    #[serde(default)]
    pub use_bif: bool,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for PmsConfig {
    fn default() -> Self {
        Self {
            ip: String::new(),
            port: default_pms_port(),
            token: String::new(),
            https: false,
            use_bif: false,
            timeout: default_timeout(),
        }
    }
}

impl PmsConfig {
    /// Base url of the server, or None when no host is configured.
    pub fn base_url(&self) -> Option<String> {
        if self.ip.is_empty() {
            return None;
        }
        let scheme = if self.https { "https" } else { "http" };
        Some(format!("{}://{}:{}", scheme, self.ip, self.port))
    }
}

fn default_listen_port() -> String {
    "8181".to_string()
}

fn default_pms_port() -> u16 {
    32400
}

fn default_timeout() -> u64 {
    10
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("pms:\n  ip: 10.0.0.5\n  token: abc\n").unwrap();
        assert_eq!(config.pms.ip, "10.0.0.5");
        assert_eq!(config.pms.port, 32400);
        assert_eq!(config.pms.timeout, 10);
        assert!(!config.pms.use_bif);
        assert!(!config.pms.https);
        assert_eq!(config.listen.port, "8181");
        assert!(config.friendly_names.is_empty());
    }

    #[test]
    fn test_base_url() {
        let mut pms = PmsConfig::default();
        assert_eq!(pms.base_url(), None);

        pms.ip = "plex.lan".to_string();
        assert_eq!(pms.base_url().as_deref(), Some("http://plex.lan:32400"));

        pms.https = true;
        pms.port = 443;
        assert_eq!(pms.base_url().as_deref(), Some("https://plex.lan:443"));
    }

    #[test]
    fn test_friendly_names() {
        let yaml = r#"
pms:
  ip: 127.0.0.1
  use_bif: true
friendly_names:
  jdoe: "John"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.pms.use_bif);
        assert_eq!(config.friendly_names.get("jdoe").map(String::as_str), Some("John"));
    }
}

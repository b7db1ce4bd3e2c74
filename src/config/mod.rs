//! Server configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::http::Limits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything the server needs to start, fixed for the life of the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Host address to bind to
    pub host: String,
    pub port: u16,
    /// Directory holding one `<title>.txt` per page
    pub data_dir: PathBuf,
    /// Directory holding `view.html`, `edit.html` and `index.html`
    pub template_dir: PathBuf,
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for WikiConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            template_dir: PathBuf::from("./tmpl"),
            max_header_bytes: limits.max_header_bytes,
            max_body_bytes: limits.max_body_bytes,
        }
    }
}

impl WikiConfig {
    /// Read a JSON config file. Fields it leaves out keep their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".to_string()));
        }
        if self.max_header_bytes == 0 || self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "request size limits must be non-zero".to_string(),
            ));
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> ConfigResult<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_header_bytes: self.max_header_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WikiConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wiki.json");
        fs::write(&path, r#"{ "port": 9000, "data_dir": "/srv/wiki" }"#).unwrap();

        let config = WikiConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/srv/wiki"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.template_dir, PathBuf::from("./tmpl"));
    }

    #[test]
    fn test_printed_config_loads_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wiki.json");
        let config = WikiConfig {
            host: "0.0.0.0".to_string(),
            max_body_bytes: 4096,
            ..Default::default()
        };

        fs::write(&path, config.to_json().unwrap()).unwrap();
        assert_eq!(WikiConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = WikiConfig::load(&temp_dir.path().join("none.json"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));

        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{ port: }").unwrap();
        assert!(matches!(WikiConfig::load(&path), Err(ConfigError::JsonError(_))));
    }

    #[test]
    fn test_ipv6_listen_addr() {
        let config = WikiConfig {
            host: "::1".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr().unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    fn test_validate() {
        let config = WikiConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = WikiConfig {
            max_body_bytes: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = WikiConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAddress(_))));
    }
}

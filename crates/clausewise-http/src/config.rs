//! HTTP server configuration.
//!
//! ## Environment Variables
//!
//! - `CLAUSEWISE_HOST` - Bind address (default: 127.0.0.1)
//! - `CLAUSEWISE_PORT` - Bind port (default: 5000)
//! - `CLAUSEWISE_UPLOAD_DIR` - Where uploads are stored (default: ./uploads)
//! - `CLAUSEWISE_MAX_BODY_SIZE` - Maximum request body in bytes (default: 16777216 / 16MB)
//! - `CLAUSEWISE_ALLOWED_EXTENSIONS` - Comma separated upload extensions (default: pdf,docx,doc,txt)
//! - `CLAUSEWISE_ENABLE_CORS` - Permissive CORS (default: true)

use clausewise::config::{
    ConfigError, get_env_bool, get_env_string, get_env_u16, get_env_usize,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024 * 1024;
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "doc", "txt"];

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_body_size: usize,
    /// Lowercase, without the leading dot.
    pub allowed_extensions: Vec<String>,
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from("./uploads"),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            enable_cors: true,
        }
    }
}

impl HttpConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = get_env_string("CLAUSEWISE_HOST") {
            config.host = host.trim().parse().map_err(|e| ConfigError::InvalidEnvVar {
                key: "CLAUSEWISE_HOST".to_string(),
                message: format!("invalid IP address '{host}': {e}"),
            })?;
        }
        if let Some(port) = get_env_u16("CLAUSEWISE_PORT")? {
            config.port = port;
        }
        if let Some(dir) = get_env_string("CLAUSEWISE_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(max_size) = get_env_usize("CLAUSEWISE_MAX_BODY_SIZE")? {
            config.max_body_size = max_size;
        }
        if let Some(extensions) = get_env_string("CLAUSEWISE_ALLOWED_EXTENSIONS") {
            config.allowed_extensions = parse_extensions(&extensions);
        }
        if let Some(cors) = get_env_bool("CLAUSEWISE_ENABLE_CORS")? {
            config.enable_cors = cors;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_size == 0 {
            return Err(ConfigError::ValidationError(
                "max_body_size must be greater than 0".to_string(),
            ));
        }
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "allowed_extensions cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|allowed| *allowed == extension)
    }
}

fn parse_extensions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions() {
        assert_eq!(parse_extensions(" PDF, .txt,,docx "), vec!["pdf", "txt", "docx"]);
    }

    #[test]
    fn test_allowed_extension_is_case_insensitive() {
        let config = HttpConfig::default();
        assert!(config.is_allowed_extension("PDF"));
        assert!(!config.is_allowed_extension("exe"));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
    }
}

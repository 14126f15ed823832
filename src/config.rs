//! Environment configuration
//!
//! Configuration lives in a dotenv-style `.env` file in the project root.
//! On first run the file is created from `.env.example` when one exists,
//! otherwise from a fixed default template. Absent keys fall back to the
//! documented defaults at load time.

use std::path::{Path, PathBuf};

use crate::error::{Result, SitectlError};

/// Configuration file in the project root
pub const CONFIG_FILE: &str = ".env";

/// Optional template the configuration is seeded from
pub const CONFIG_TEMPLATE: &str = ".env.example";

const DEFAULT_ENV: &str = "\
# Marketing site environment configuration
# Development settings
DEPLOYMENT_MODE=development
DEBUG=true
HOST=localhost
PORT=5000
APP_URL=http://localhost:5000

# Database (reserved for future features)
DATABASE_URL=sqlite:///site.db

# API keys (add as needed)
GOOGLE_ANALYTICS_ID=
SENTRY_DSN=

# Build settings
NODE_ENV=development
VITE_API_URL=http://localhost:5000/api

# Security
SECRET_KEY=change-me-in-production
ALLOWED_HOSTS=localhost,127.0.0.1

# Performance
CACHE_TIMEOUT=300
STATIC_FILE_CACHE=3600

# Localization
DEFAULT_LANGUAGE=en
SUPPORTED_LANGUAGES=en,sv
TIMEZONE=Europe/Stockholm
";

/// Ensure a configuration file exists in the project root
///
/// Copies the template when one is present, otherwise writes the default
/// set. Idempotent once the file exists. Returns the configuration path.
pub fn ensure_configuration(root: &Path) -> Result<PathBuf> {
    let env_file = root.join(CONFIG_FILE);
    if env_file.exists() {
        return Ok(env_file);
    }

    let template = root.join(CONFIG_TEMPLATE);
    if template.exists() {
        std::fs::copy(&template, &env_file).map_err(|e| SitectlError::ConfigWriteFailed {
            path: env_file.display().to_string(),
            reason: e.to_string(),
        })?;
        println!("Created {} from {}", CONFIG_FILE, CONFIG_TEMPLATE);
    } else {
        std::fs::write(&env_file, DEFAULT_ENV).map_err(|e| SitectlError::ConfigWriteFailed {
            path: env_file.display().to_string(),
            reason: e.to_string(),
        })?;
        println!("Created default {} file", CONFIG_FILE);
    }

    Ok(env_file)
}

/// Runtime configuration with documented defaults
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub deployment_mode: String,
    pub app_url: String,
    pub secret_key: String,
    pub allowed_hosts: Vec<String>,
    pub cache_timeout: u64,
    pub static_file_cache: u64,
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub timezone: String,
    /// Backend entry script launched through the runtime environment's
    /// interpreter when present in the project
    pub backend_entry: String,
}

impl AppConfig {
    /// Load configuration for a project root
    ///
    /// Reads the `.env` file into the process environment (a missing file is
    /// tolerated), then resolves each key with its default. A malformed
    /// numeric value falls back to the default rather than failing.
    pub fn load(root: &Path) -> Self {
        let _ = dotenvy::from_path(root.join(CONFIG_FILE));

        Self {
            host: env_or("HOST", "localhost"),
            port: env_parsed("PORT", 5000),
            debug: env_or("DEBUG", "true").eq_ignore_ascii_case("true"),
            deployment_mode: env_or("DEPLOYMENT_MODE", "development"),
            app_url: env_or("APP_URL", "http://localhost:5000"),
            secret_key: env_or("SECRET_KEY", "change-me-in-production"),
            allowed_hosts: env_list("ALLOWED_HOSTS", "localhost,127.0.0.1"),
            cache_timeout: env_parsed("CACHE_TIMEOUT", 300),
            static_file_cache: env_parsed("STATIC_FILE_CACHE", 3600),
            default_language: env_or("DEFAULT_LANGUAGE", "en"),
            supported_languages: env_list("SUPPORTED_LANGUAGES", "en,sv"),
            timezone: env_or("TIMEZONE", "Europe/Stockholm"),
            backend_entry: env_or("BACKEND_ENTRY", "server/app.py"),
        }
    }
}

/// Credentials for the file-transfer deployment
///
/// Absence of any required field is a valid state and selects the
/// manual-packaging fallback, not an error.
#[derive(Debug, Clone)]
pub struct TransferCredentials {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Public URL of the deployed site, used for the post-deploy browser open
    pub domain: Option<String>,
}

impl TransferCredentials {
    /// Environment keys required for an automated transfer
    pub const REQUIRED_KEYS: [&'static str; 3] =
        ["DEPLOY_FTP_HOST", "DEPLOY_FTP_USERNAME", "DEPLOY_FTP_PASSWORD"];

    /// Read transfer credentials from the environment
    pub fn from_env() -> Option<Self> {
        let host = non_empty_env("DEPLOY_FTP_HOST")?;
        let username = non_empty_env("DEPLOY_FTP_USERNAME")?;
        let password = non_empty_env("DEPLOY_FTP_PASSWORD")?;
        Some(Self {
            host,
            username,
            password,
            domain: non_empty_env("DEPLOY_DOMAIN"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_list(key: &str, default: &str) -> Vec<String> {
    env_or(key, default)
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for key in [
            "HOST",
            "PORT",
            "DEBUG",
            "DEPLOYMENT_MODE",
            "APP_URL",
            "SECRET_KEY",
            "ALLOWED_HOSTS",
            "CACHE_TIMEOUT",
            "STATIC_FILE_CACHE",
            "DEFAULT_LANGUAGE",
            "SUPPORTED_LANGUAGES",
            "TIMEZONE",
            "BACKEND_ENTRY",
            "DEPLOY_FTP_HOST",
            "DEPLOY_FTP_USERNAME",
            "DEPLOY_FTP_PASSWORD",
            "DEPLOY_DOMAIN",
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_ensure_configuration_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = ensure_configuration(temp.path()).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("HOST=localhost"));
        assert!(content.contains("PORT=5000"));
        assert!(content.contains("SUPPORTED_LANGUAGES=en,sv"));
    }

    #[test]
    #[serial]
    fn test_ensure_configuration_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = ensure_configuration(temp.path()).unwrap();
        std::fs::write(&path, "PORT=9999\n").unwrap();

        // Second call must not touch the existing file
        ensure_configuration(temp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "PORT=9999\n");
    }

    #[test]
    #[serial]
    fn test_ensure_configuration_prefers_template() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_TEMPLATE), "PORT=8080\n").unwrap();

        let path = ensure_configuration(temp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "PORT=8080\n");
    }

    #[test]
    #[serial]
    fn test_app_config_defaults() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(temp.path());

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5000);
        assert!(config.debug);
        assert_eq!(config.deployment_mode, "development");
        assert_eq!(config.allowed_hosts, vec!["localhost", "127.0.0.1"]);
        assert_eq!(config.supported_languages, vec!["en", "sv"]);
        assert_eq!(config.backend_entry, "server/app.py");
    }

    #[test]
    #[serial]
    fn test_app_config_malformed_port_falls_back() {
        clear_env();
        unsafe {
            std::env::set_var("PORT", "not-a-number");
        }
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(temp.path());
        assert_eq!(config.port, 5000);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_transfer_credentials_absent() {
        clear_env();
        assert!(TransferCredentials::from_env().is_none());
    }

    #[test]
    #[serial]
    fn test_transfer_credentials_partial_is_none() {
        clear_env();
        unsafe {
            std::env::set_var("DEPLOY_FTP_HOST", "ftp.example.com");
            std::env::set_var("DEPLOY_FTP_USERNAME", "deploy");
        }
        assert!(TransferCredentials::from_env().is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_transfer_credentials_complete() {
        clear_env();
        unsafe {
            std::env::set_var("DEPLOY_FTP_HOST", "ftp.example.com");
            std::env::set_var("DEPLOY_FTP_USERNAME", "deploy");
            std::env::set_var("DEPLOY_FTP_PASSWORD", "hunter2");
        }
        let creds = TransferCredentials::from_env().unwrap();
        assert_eq!(creds.host, "ftp.example.com");
        assert_eq!(creds.username, "deploy");
        assert!(creds.domain.is_none());
        clear_env();
    }
}

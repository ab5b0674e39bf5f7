// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads collaborator endpoint, public key, timeouts and session file location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Configuration comes from environment variables only; there is no config file.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `FIT28_BACKEND_URL` | required |
//! | `FIT28_BACKEND_ANON_KEY` | required |
//! | `FIT28_PASSWORD_RESET_REDIRECT` | `fit28://reset-password` |
//! | `FIT28_HTTP_TIMEOUT_SECS` | `30` |
//! | `FIT28_HTTP_CONNECT_TIMEOUT_SECS` | `10` |
//! | `FIT28_SESSION_FILE` | `<data_dir>/fit28/session.json` |
//! | `ENVIRONMENT` | `development` |

use crate::backend::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::backend::session_storage::SessionStorage;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use url::Url;

/// Collaborator endpoint
pub const BACKEND_URL: &str = "FIT28_BACKEND_URL";
/// Collaborator public key
pub const BACKEND_ANON_KEY: &str = "FIT28_BACKEND_ANON_KEY";
/// Link target of password recovery emails
pub const PASSWORD_RESET_REDIRECT: &str = "FIT28_PASSWORD_RESET_REDIRECT";
/// Request timeout
pub const HTTP_TIMEOUT_SECS: &str = "FIT28_HTTP_TIMEOUT_SECS";
/// Connect timeout
pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "FIT28_HTTP_CONNECT_TIMEOUT_SECS";
/// Session file override
pub const SESSION_FILE: &str = "FIT28_SESSION_FILE";

/// Default recovery link target
pub const DEFAULT_PASSWORD_RESET_REDIRECT: &str = "fit28://reset-password";

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Released build
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Connection parameters handed to the collaborator client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the hosted service
    pub url: Url,
    /// Public (anon) key
    pub anon_key: String,
    /// Link target of password recovery emails
    pub password_reset_redirect: String,
    /// Request timeout in seconds
    pub http_timeout_secs: u64,
    /// Connect timeout in seconds
    pub http_connect_timeout_secs: u64,
    /// Where the issued session is persisted
    pub session_file: PathBuf,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Collaborator connection
    pub backend: BackendConfig,
    /// Deployment environment
    pub environment: Environment,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when a required variable is unset and
    /// `ConfigInvalid` when a value cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let raw_url = env_var_required(BACKEND_URL)?;
        let url = parse_base_url(&raw_url)?;

        let config = Self {
            backend: BackendConfig {
                url,
                anon_key: env_var_required(BACKEND_ANON_KEY)?,
                password_reset_redirect: env_var_or(
                    PASSWORD_RESET_REDIRECT,
                    DEFAULT_PASSWORD_RESET_REDIRECT,
                ),
                http_timeout_secs: env_parse_or(HTTP_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?,
                http_connect_timeout_secs: env_parse_or(
                    HTTP_CONNECT_TIMEOUT_SECS,
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
                session_file: env::var(SESSION_FILE)
                    .map_or_else(|_| SessionStorage::default_path(), PathBuf::from),
            },
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
        };

        info!(
            backend = %config.backend.url,
            environment = %config.environment,
            "Configuration loaded from environment"
        );
        Ok(config)
    }
}

/// Parse the collaborator URL, normalizing it to end with a slash so that
/// relative endpoint paths join under it
fn parse_base_url(raw: &str) -> AppResult<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    let url =
        Url::parse(&normalized).map_err(|e| AppError::config_invalid(BACKEND_URL, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::config_invalid(
            BACKEND_URL,
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_var_required(key: &str) -> AppResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config_missing(key)),
    }
}

fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| AppError::config_invalid(key, e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("https://abc.example.co").unwrap();
        assert_eq!(url.as_str(), "https://abc.example.co/");
        assert_eq!(
            url.join("auth/v1/token").unwrap().as_str(),
            "https://abc.example.co/auth/v1/token"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("ftp://abc.example.co").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("whatever"),
            Environment::Development
        );
        assert_eq!(Environment::Testing.to_string(), "testing");
    }
}

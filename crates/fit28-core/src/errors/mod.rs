// ABOUTME: Unified error type and error codes for store actions and collaborator calls
// ABOUTME: Classifies authentication, connectivity, validation and internal failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in fit28 returns [`AppResult`]. Only authentication and
//! connectivity failures are meant to reach the presentation layer; persistence
//! failures of optimistic writes are reported through the store's sync-event
//! channel instead of being returned.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// No authenticated session
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// Wrong email or password
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,
    /// Session token expired
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired = 1002,
    /// Password rejected by the collaborator's policy
    #[serde(rename = "AUTH_WEAK_PASSWORD")]
    AuthWeakPassword = 1003,
    /// Registration for an email that already has an account
    #[serde(rename = "AUTH_USER_EXISTS")]
    AuthUserExists = 1004,
    /// Account exists but the email address is not confirmed yet
    #[serde(rename = "AUTH_EMAIL_UNVERIFIED")]
    AuthEmailUnverified = 1005,

    // Rate Limiting (2000-2999)
    /// Too many requests to the collaborator
    #[serde(rename = "RATE_LIMIT_EXCEEDED")]
    RateLimitExceeded = 2000,

    // Validation (3000-3999)
    /// Malformed input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Operation not allowed in the current store state
    #[serde(rename = "INVALID_STATE")]
    InvalidState = 3001,

    // Resource Management (4000-4999)
    /// Record or catalog entry not found
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Record already exists
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,

    // External Services (5000-5999)
    /// Collaborator answered with an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Collaborator unreachable
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Generic configuration error
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration value missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration value present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Row could not be encoded or decoded
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Map an HTTP status returned by the collaborator onto an error code
    #[must_use]
    pub const fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidInput,
            401 => Self::AuthInvalid,
            403 => Self::AuthExpired,
            404 => Self::ResourceNotFound,
            409 => Self::ResourceAlreadyExists,
            429 => Self::RateLimitExceeded,
            502..=504 => Self::ExternalServiceUnavailable,
            _ => Self::ExternalServiceError,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "You need to sign in first",
            Self::AuthInvalid => "Invalid email or password",
            Self::AuthExpired => "Your session has expired, please sign in again",
            Self::AuthWeakPassword => "The password does not meet the requirements",
            Self::AuthUserExists => "An account with this email already exists",
            Self::AuthEmailUnverified => "Please confirm your email address first",
            Self::RateLimitExceeded => "Too many attempts, please wait a moment",
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidState => "This action is not available right now",
            Self::ResourceNotFound => "The requested item was not found",
            Self::ResourceAlreadyExists => "This item already exists",
            Self::ExternalServiceError => "The server reported an error",
            Self::ExternalServiceUnavailable => "The server could not be reached",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Collection or record the error relates to, if any
    pub resource: Option<String>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            resource: None,
            source: None,
        }
    }

    /// Attach the collection or record name the error relates to
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether this is one of the credential/session failures of the auth flow
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::AuthRequired
                | ErrorCode::AuthInvalid
                | ErrorCode::AuthExpired
                | ErrorCode::AuthWeakPassword
                | ErrorCode::AuthUserExists
                | ErrorCode::AuthEmailUnverified
                | ErrorCode::RateLimitExceeded
        )
    }

    /// Whether the collaborator could not be reached at all
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self.code, ErrorCode::ExternalServiceUnavailable)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Invalid credentials
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::new(ErrorCode::ResourceNotFound, format!("{resource} not found"))
            .with_resource(resource)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Action not allowed in the current state
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration value missing
    pub fn config_missing(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(ErrorCode::ConfigMissing, format!("{key} is not set")).with_resource(key)
    }

    /// Configuration value could not be used
    pub fn config_invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorCode::ConfigInvalid,
            format!("{key}: {}", message.into()),
        )
        .with_resource(key)
    }

    /// Collaborator answered with an error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Collaborator could not be reached
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceUnavailable, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string()).with_source(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => Self::new(
                ErrorCode::InternalError,
                format!("{error} (caused by: {source})"),
            ),
            None => Self::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let code = if error.is_connect() || error.is_timeout() {
            ErrorCode::ExternalServiceUnavailable
        } else if error.is_decode() {
            ErrorCode::SerializationError
        } else {
            error
                .status()
                .map_or(ErrorCode::ExternalServiceError, |status| {
                    ErrorCode::from_http_status(status.as_u16())
                })
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::from_http_status(401), ErrorCode::AuthInvalid);
        assert_eq!(ErrorCode::from_http_status(429), ErrorCode::RateLimitExceeded);
        assert_eq!(
            ErrorCode::from_http_status(503),
            ErrorCode::ExternalServiceUnavailable
        );
        assert_eq!(
            ErrorCode::from_http_status(500),
            ErrorCode::ExternalServiceError
        );
    }

    #[test]
    fn test_taxonomy_classification() {
        assert!(AppError::auth_invalid("bad password").is_authentication());
        assert!(AppError::new(ErrorCode::RateLimitExceeded, "slow down").is_authentication());
        assert!(AppError::unavailable("offline").is_connectivity());
        assert!(!AppError::internal("boom").is_authentication());
    }

    #[test]
    fn test_display_includes_description() {
        let error = AppError::not_found("workout 42");
        assert_eq!(error.resource.as_deref(), Some("workout 42"));
        assert!(error.to_string().contains("workout 42 not found"));
        assert!(error.to_string().starts_with("The requested item"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::AuthUserExists).unwrap();
        assert_eq!(json, "\"AUTH_USER_EXISTS\"");
    }
}

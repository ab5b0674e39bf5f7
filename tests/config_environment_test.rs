// ABOUTME: Integration tests for environment-based configuration loading
// ABOUTME: Tests required variables, defaults and rejection of unparsable values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use anyhow::Result;
use fit28::config::environment::{
    AppConfig, Environment, BACKEND_ANON_KEY, BACKEND_URL, DEFAULT_PASSWORD_RESET_REDIRECT,
    HTTP_CONNECT_TIMEOUT_SECS, HTTP_TIMEOUT_SECS, PASSWORD_RESET_REDIRECT, SESSION_FILE,
};
use fit28::errors::ErrorCode;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const ALL_VARS: [&str; 7] = [
    BACKEND_URL,
    BACKEND_ANON_KEY,
    PASSWORD_RESET_REDIRECT,
    HTTP_TIMEOUT_SECS,
    HTTP_CONNECT_TIMEOUT_SECS,
    SESSION_FILE,
    "ENVIRONMENT",
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

fn set_required() {
    env::set_var(BACKEND_URL, "https://fit28.example.co");
    env::set_var(BACKEND_ANON_KEY, "public-anon-key");
}

#[test]
#[serial]
fn test_missing_backend_url_is_reported() {
    clear_env();
    env::set_var(BACKEND_ANON_KEY, "public-anon-key");

    let err = AppConfig::from_env().expect_err("url is required");
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains(BACKEND_URL));

    clear_env();
}

#[test]
#[serial]
fn test_blank_anon_key_counts_as_missing() {
    clear_env();
    env::set_var(BACKEND_URL, "https://fit28.example.co");
    env::set_var(BACKEND_ANON_KEY, "   ");

    let err = AppConfig::from_env().expect_err("key is required");
    assert_eq!(err.code, ErrorCode::ConfigMissing);

    clear_env();
}

#[test]
#[serial]
fn test_defaults_apply_when_optional_vars_are_unset() -> Result<()> {
    clear_env();
    set_required();

    let config = AppConfig::from_env()?;
    assert_eq!(config.backend.url.as_str(), "https://fit28.example.co/");
    assert_eq!(config.backend.anon_key, "public-anon-key");
    assert_eq!(
        config.backend.password_reset_redirect,
        DEFAULT_PASSWORD_RESET_REDIRECT
    );
    assert_eq!(config.backend.http_timeout_secs, 30);
    assert_eq!(config.backend.http_connect_timeout_secs, 10);
    assert!(config.backend.session_file.ends_with("session.json"));
    assert_eq!(config.environment, Environment::Development);

    clear_env();
    Ok(())
}

#[test]
#[serial]
fn test_overrides_are_honored() -> Result<()> {
    clear_env();
    set_required();
    env::set_var(PASSWORD_RESET_REDIRECT, "https://fit28.example.co/reset");
    env::set_var(HTTP_TIMEOUT_SECS, "5");
    env::set_var(SESSION_FILE, "/tmp/fit28-test/session.json");
    env::set_var("ENVIRONMENT", "production");

    let config = AppConfig::from_env()?;
    assert_eq!(
        config.backend.password_reset_redirect,
        "https://fit28.example.co/reset"
    );
    assert_eq!(config.backend.http_timeout_secs, 5);
    assert_eq!(
        config.backend.session_file,
        PathBuf::from("/tmp/fit28-test/session.json")
    );
    assert!(config.environment.is_production());

    clear_env();
    Ok(())
}

#[test]
#[serial]
fn test_unparsable_values_are_rejected() {
    clear_env();
    set_required();
    env::set_var(HTTP_CONNECT_TIMEOUT_SECS, "soon");

    let err = AppConfig::from_env().expect_err("timeout must be numeric");
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    env::set_var(HTTP_CONNECT_TIMEOUT_SECS, "10");
    env::set_var(BACKEND_URL, "ftp://fit28.example.co");
    let err = AppConfig::from_env().expect_err("scheme must be http");
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    clear_env();
}

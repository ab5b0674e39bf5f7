// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, in-memory backend, account and store helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `fit28`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fit28::backend::memory::MemoryBackend;
use fit28::backend::{AuthUser, UserMetadata};
use fit28::catalog::Catalog;
use fit28::constants::tables;
use fit28::store::Store;
use serde_json::{json, Value};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Password accepted by every test account
pub const PASSWORD: &str = "correct-horse-1";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// In-memory backend holding one confirmed account
pub async fn backend_with_account(email: &str) -> (Arc<MemoryBackend>, AuthUser) {
    init_test_logging();
    let backend = Arc::new(MemoryBackend::new());
    let user = backend
        .add_account(
            email,
            PASSWORD,
            UserMetadata {
                full_name: Some("Test User".to_owned()),
                phone: Some("+1 555 0100".to_owned()),
            },
        )
        .await;
    (backend, user)
}

/// Fresh signed-out store over `backend`
pub fn store_over(backend: &Arc<MemoryBackend>) -> Result<Store> {
    Ok(Store::new(backend.clone(), Arc::new(Catalog::builtin()))?)
}

/// Store signed in through `login`, with a profile row seeded from `profile`
pub async fn signed_in_store(profile: Value) -> Result<(Store, Arc<MemoryBackend>, AuthUser)> {
    let (backend, user) = backend_with_account("athlete@example.com").await;
    seed_profile(&backend, &user, profile).await;
    let mut store = store_over(&backend)?;
    store.login(&user.email, PASSWORD).await?;
    Ok((store, backend, user))
}

/// Seed a profile row for `user`; `fields` are merged over the id
pub async fn seed_profile(backend: &MemoryBackend, user: &AuthUser, fields: Value) {
    let mut row = json!({ "id": user.id, "email": user.email });
    if let (Some(row), Value::Object(fields)) = (row.as_object_mut(), fields) {
        row.extend(fields);
    }
    backend.seed_row(tables::PROFILES, row).await;
}

/// Seed a row owned by `user` with an explicit creation time
pub async fn seed_owned(
    backend: &MemoryBackend,
    table: &str,
    user: &AuthUser,
    fields: Value,
    created_at: DateTime<Utc>,
) {
    let mut row = json!({ "user_id": user.id, "created_at": created_at.to_rfc3339() });
    if let (Some(row), Value::Object(fields)) = (row.as_object_mut(), fields) {
        row.extend(fields);
    }
    backend.seed_row(table, row).await;
}

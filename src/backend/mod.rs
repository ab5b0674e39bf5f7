// ABOUTME: Remote persistence collaborator boundary for session and record access
// ABOUTME: Defines the RemoteBackend trait, query filters and auth session types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Remote Persistence Collaborator
//!
//! The application never owns a database. Durable copies of every record live in a
//! hosted auth + row-store service, reached through the [`RemoteBackend`] trait.
//!
//! ## Contract
//!
//! - **Session**: `get_session`, `sign_in_with_password`, `sign_up`, `sign_out`,
//!   `reset_password_for_email`
//! - **Records**: `select`, `insert`, `update` over named collections (see
//!   [`tables`](fit28_core::constants::tables)), scoped to the signed-in identity
//!   by an equality filter on `user_id` or `id`
//!
//! Rows travel as `serde_json::Value`; [`select_rows`] and [`insert_row`] convert
//! them to the typed models of `fit28_core::models`.
//!
//! ## Implementations
//!
//! - [`rest::RestBackend`]: HTTP client for the hosted service
//! - [`memory::MemoryBackend`]: in-process store with failure injection and a call
//!   log, used by tests and offline demos

/// Shared HTTP client with connection pooling
pub mod http_client;
/// In-memory collaborator
pub mod memory;
/// HTTP collaborator client
pub mod rest;
/// On-disk persistence of the issued session
pub mod session_storage;

use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Metadata stored with the auth identity at sign-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Display name entered at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Phone entered at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Authenticated identity as reported by the collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Identity id, also the key of the profile row
    pub id: Uuid,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Sign-up metadata
    #[serde(default, alias = "user_metadata")]
    pub metadata: UserMetadata,
}

/// An issued session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for record access
    pub access_token: String,
    /// Token used to obtain a new access token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token expiry
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Identity the session belongs to
    pub user: AuthUser,
}

impl Session {
    /// Whether the access token has expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Result of a registration
///
/// `session` is absent when the collaborator requires out-of-band verification
/// (e.g. email confirmation) before signing the user in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResult {
    /// Newly created identity
    pub user: AuthUser,
    /// Session issued immediately, if any
    pub session: Option<Session>,
}

/// Comparison operator of a [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// Equal
    Eq,
    /// Greater than or equal
    Gte,
    /// Less than or equal
    Lte,
}

impl FilterOp {
    /// Operator keyword used in query strings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gte => "gte",
            Self::Lte => "lte",
        }
    }
}

/// A column filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Column name
    pub column: String,
    /// Operator
    pub op: FilterOp,
    /// Operand
    pub value: Value,
}

impl Filter {
    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    /// Operand rendered for a query string
    #[must_use]
    pub fn value_as_param(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Oldest / smallest first
    Ascending,
    /// Newest / largest first
    Descending,
}

/// Sort order of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Column to sort by
    pub column: String,
    /// Direction
    pub direction: Direction,
}

/// Filters plus optional ordering for a `select`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Filters, all of which must match
    pub filters: Vec<Filter>,
    /// Optional ordering
    pub order: Option<Order>,
}

impl Query {
    /// Query matching every row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    /// Add a lower bound filter
    #[must_use]
    pub fn gte(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            op: FilterOp::Gte,
            value: value.into(),
        });
        self
    }

    /// Add an upper bound filter
    #[must_use]
    pub fn lte(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            op: FilterOp::Lte,
            value: value.into(),
        });
        self
    }

    /// Sort the result
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }
}

/// Hosted auth + row-store service consumed by the application store
///
/// All implementations must be `Send + Sync`: detached persistence tasks share the
/// backend through an `Arc`.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Backend name used in logs and errors
    fn name(&self) -> &'static str;

    /// Recover an existing session, if one is stored
    async fn get_session(&self) -> AppResult<Option<Session>>;

    /// Verify credentials and issue a session
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Create a new identity
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> AppResult<SignUpResult>;

    /// Invalidate the current session
    async fn sign_out(&self) -> AppResult<()>;

    /// Ask the collaborator to send a password recovery link
    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> AppResult<()>;

    /// Rows of `table` matching `query`
    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Value>>;

    /// Insert one record, returning the stored row
    async fn insert(&self, table: &str, record: Value) -> AppResult<Value>;

    /// Apply `patch` to every row matching `filters`
    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> AppResult<()>;
}

/// Select and decode rows into a typed model
///
/// # Errors
///
/// Returns an error if the backend call fails or a row does not decode
pub async fn select_rows<T: DeserializeOwned>(
    backend: &dyn RemoteBackend,
    table: &str,
    query: &Query,
) -> AppResult<Vec<T>> {
    backend
        .select(table, query)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value::<T>(row).map_err(AppError::from))
        .collect()
}

/// Encode a typed model and insert it
///
/// # Errors
///
/// Returns an error if encoding fails or the backend rejects the row
pub async fn insert_row<T: Serialize + Sync>(
    backend: &dyn RemoteBackend,
    table: &str,
    row: &T,
) -> AppResult<Value> {
    backend.insert(table, serde_json::to_value(row)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_query_builder_collects_filters_in_order() {
        let user_id = Uuid::new_v4();
        let query = Query::new()
            .eq("user_id", user_id.to_string())
            .gte("created_at", "2026-10-19T00:00:00Z")
            .order_by("created_at", Direction::Descending);

        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters[0].op, FilterOp::Eq);
        assert_eq!(query.filters[0].value_as_param(), user_id.to_string());
        assert_eq!(query.filters[1].op.as_str(), "gte");
        assert_eq!(
            query.order.map(|o| o.direction),
            Some(Direction::Descending)
        );
    }

    #[test]
    fn test_numeric_filter_param_is_unquoted() {
        assert_eq!(Filter::eq("workout_id", 7).value_as_param(), "7");
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session {
            access_token: "token".to_owned(),
            refresh_token: None,
            expires_at: Some(now - Duration::seconds(1)),
            user: AuthUser {
                id: Uuid::new_v4(),
                email: "a@b.c".to_owned(),
                metadata: UserMetadata::default(),
            },
        };
        assert!(session.is_expired_at(now));
        assert!(!Session {
            expires_at: None,
            ..session
        }
        .is_expired_at(now));
    }
}

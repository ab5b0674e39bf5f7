// ABOUTME: In-memory collaborator implementation with accounts, tables and a call log
// ABOUTME: Supports fault injection (offline, failing tables, delayed writes) for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    AuthUser, Direction, Filter, FilterOp, Query, RemoteBackend, Session, SignUpResult,
    UserMetadata,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use fit28_core::constants::tables;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time;
use uuid::Uuid;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

/// Lifetime of issued sessions
const SESSION_TTL_HOURS: i64 = 1;

/// Kind of collaborator operation recorded in the call log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `get_session`
    GetSession,
    /// `sign_in_with_password`
    SignIn,
    /// `sign_up`
    SignUp,
    /// `sign_out`
    SignOut,
    /// `reset_password_for_email`
    ResetPassword,
    /// `select`
    Select,
    /// `insert`
    Insert,
    /// `update`
    Update,
}

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCall {
    /// Operation
    pub kind: CallKind,
    /// Collection, for record operations
    pub table: Option<String>,
}

/// Injected failures
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Every call fails with a connectivity error
    pub offline: bool,
    /// Inserts and updates to these collections fail
    pub failing_tables: HashSet<String>,
    /// Selects from these collections fail
    pub failing_reads: HashSet<String>,
    /// Sign-out fails after the local session is dropped
    pub fail_sign_out: bool,
    /// Delay applied before inserts and updates take effect
    pub write_delay: Option<Duration>,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: AuthUser,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    tables: HashMap<String, Vec<Value>>,
    session: Option<Session>,
    calls: Vec<BackendCall>,
}

/// In-process collaborator
///
/// Behaves like the hosted service closely enough for the store: record writes
/// require a session, `created_at` is stamped on insert, duplicate profile ids
/// are rejected.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: RwLock<Inner>,
    faults: RwLock<Faults>,
    require_email_confirmation: bool,
}

impl MemoryBackend {
    /// Backend that issues a session immediately on sign-up
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that requires email confirmation before issuing sessions
    #[must_use]
    pub fn with_email_confirmation() -> Self {
        Self {
            require_email_confirmation: true,
            ..Self::default()
        }
    }

    /// Create a confirmed account
    pub async fn add_account(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            metadata,
        };
        self.inner.write().await.accounts.insert(
            email.to_lowercase(),
            Account {
                password: password.to_owned(),
                user: user.clone(),
                confirmed: true,
            },
        );
        user
    }

    /// Mark an account's email as confirmed
    pub async fn confirm_email(&self, email: &str) {
        if let Some(account) = self
            .inner
            .write()
            .await
            .accounts
            .get_mut(&email.to_lowercase())
        {
            account.confirmed = true;
        }
    }

    /// Pretend a session was persisted by an earlier process
    pub async fn restore_session(&self, user: &AuthUser) -> Session {
        let session = issue_session(user.clone());
        self.inner.write().await.session = Some(session.clone());
        session
    }

    /// Insert a row directly, bypassing the call log and faults
    pub async fn seed_row(&self, table: &str, row: Value) {
        let row = stamp_created_at(row);
        self.inner
            .write()
            .await
            .tables
            .entry(table.to_owned())
            .or_default()
            .push(row);
    }

    /// Snapshot of a collection
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.inner
            .read()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the call log
    pub async fn calls(&self) -> Vec<BackendCall> {
        self.inner.read().await.calls.clone()
    }

    /// Number of recorded calls of `kind`, optionally restricted to `table`
    pub async fn call_count(&self, kind: CallKind, table: Option<&str>) -> usize {
        self.inner
            .read()
            .await
            .calls
            .iter()
            .filter(|call| call.kind == kind && (table.is_none() || call.table.as_deref() == table))
            .count()
    }

    /// Replace the injected faults
    pub async fn set_faults(&self, faults: Faults) {
        *self.faults.write().await = faults;
    }

    /// Toggle the offline fault
    pub async fn set_offline(&self, offline: bool) {
        self.faults.write().await.offline = offline;
    }

    /// Make inserts and updates to `table` fail
    pub async fn fail_writes_to(&self, table: &str) {
        self.faults
            .write()
            .await
            .failing_tables
            .insert(table.to_owned());
    }

    /// Make selects from `table` fail
    pub async fn fail_reads_from(&self, table: &str) {
        self.faults
            .write()
            .await
            .failing_reads
            .insert(table.to_owned());
    }

    async fn record(&self, kind: CallKind, table: Option<&str>) -> AppResult<()> {
        self.inner.write().await.calls.push(BackendCall {
            kind,
            table: table.map(str::to_owned),
        });
        if self.faults.read().await.offline {
            return Err(AppError::unavailable("memory backend is offline"));
        }
        Ok(())
    }

    async fn prepare_write(&self, table: &str) -> AppResult<()> {
        let faults = self.faults.read().await.clone();
        if let Some(delay) = faults.write_delay {
            time::sleep(delay).await;
        }
        if faults.failing_tables.contains(table) {
            return Err(AppError::external_service(
                "memory",
                format!("write to {table} rejected"),
            )
            .with_resource(table));
        }
        if self.inner.read().await.session.is_none() {
            return Err(AppError::auth_required().with_resource(table));
        }
        Ok(())
    }
}

fn issue_session(user: AuthUser) -> Session {
    Session {
        access_token: format!("mem-{}", Uuid::new_v4()),
        refresh_token: Some(format!("mem-refresh-{}", Uuid::new_v4())),
        expires_at: Some(Utc::now() + ChronoDuration::hours(SESSION_TTL_HOURS)),
        user,
    }
}

fn stamp_created_at(row: Value) -> Value {
    match row {
        Value::Object(mut map) => {
            map.entry("created_at")
                .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
            Value::Object(map)
        }
        other => other,
    }
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => {
            match (
                DateTime::parse_from_rfc3339(a),
                DateTime::parse_from_rfc3339(b),
            ) {
                (Ok(a), Ok(b)) => Some(a.cmp(&b)),
                _ => Some(a.cmp(b)),
            }
        }
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    let Some(field) = row.get(&filter.column) else {
        return false;
    };
    let ordering = compare_values(field, &filter.value);
    match filter.op {
        FilterOp::Eq => ordering == Some(Ordering::Equal),
        FilterOp::Gte => ordering.is_some_and(|o| o != Ordering::Less),
        FilterOp::Lte => ordering.is_some_and(|o| o != Ordering::Greater),
    }
}

#[async_trait]
impl RemoteBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get_session(&self) -> AppResult<Option<Session>> {
        self.record(CallKind::GetSession, None).await?;
        Ok(self.inner.read().await.session.clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<Session> {
        self.record(CallKind::SignIn, None).await?;
        let mut inner = self.inner.write().await;
        let account = inner
            .accounts
            .get(&email.to_lowercase())
            .filter(|account| account.password == password)
            .cloned()
            .ok_or_else(|| AppError::auth_invalid("Invalid login credentials"))?;
        if !account.confirmed {
            return Err(AppError::new(
                ErrorCode::AuthEmailUnverified,
                "Email not confirmed",
            ));
        }
        let session = issue_session(account.user);
        inner.session = Some(session.clone());
        drop(inner);
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> AppResult<SignUpResult> {
        self.record(CallKind::SignUp, None).await?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::new(
                ErrorCode::AuthWeakPassword,
                format!("Password should be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        let mut inner = self.inner.write().await;
        let key = email.to_lowercase();
        if inner.accounts.contains_key(&key) {
            return Err(AppError::new(
                ErrorCode::AuthUserExists,
                "User already registered",
            ));
        }

        let user = AuthUser {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            metadata,
        };
        let confirmed = !self.require_email_confirmation;
        inner.accounts.insert(
            key,
            Account {
                password: password.to_owned(),
                user: user.clone(),
                confirmed,
            },
        );

        let session = confirmed.then(|| issue_session(user.clone()));
        inner.session.clone_from(&session);
        drop(inner);
        Ok(SignUpResult { user, session })
    }

    async fn sign_out(&self) -> AppResult<()> {
        let recorded = self.record(CallKind::SignOut, None).await;
        self.inner.write().await.session = None;
        recorded?;
        if self.faults.read().await.fail_sign_out {
            return Err(AppError::external_service("memory", "sign-out rejected"));
        }
        Ok(())
    }

    async fn reset_password_for_email(&self, _email: &str, _redirect_to: &str) -> AppResult<()> {
        self.record(CallKind::ResetPassword, None).await
    }

    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Value>> {
        self.record(CallKind::Select, Some(table)).await?;
        if self.faults.read().await.failing_reads.contains(table) {
            return Err(AppError::external_service(
                "memory",
                format!("read from {table} rejected"),
            )
            .with_resource(table));
        }
        let inner = self.inner.read().await;
        if inner.session.is_none() {
            return Ok(Vec::new());
        }

        let mut rows: Vec<Value> = inner
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|filter| matches(row, filter)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(inner);

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = match (a.get(&order.column), b.get(&order.column)) {
                    (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                };
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, record: Value) -> AppResult<Value> {
        self.record(CallKind::Insert, Some(table)).await?;
        self.prepare_write(table).await?;
        if !record.is_object() {
            return Err(AppError::invalid_input(format!(
                "{table} rows must be objects"
            )));
        }

        let row = stamp_created_at(record);
        let mut inner = self.inner.write().await;
        let rows = inner.tables.entry(table.to_owned()).or_default();
        if table == tables::PROFILES {
            let id = row.get("id");
            if rows.iter().any(|existing| existing.get("id") == id) {
                return Err(AppError::new(
                    ErrorCode::ResourceAlreadyExists,
                    "duplicate key value violates unique constraint",
                )
                .with_resource(table));
            }
        }
        rows.push(row.clone());
        drop(inner);
        Ok(row)
    }

    async fn update(&self, table: &str, patch: Value, filters: &[Filter]) -> AppResult<()> {
        self.record(CallKind::Update, Some(table)).await?;
        self.prepare_write(table).await?;
        let Value::Object(patch) = patch else {
            return Err(AppError::invalid_input("update patch must be an object"));
        };

        let mut inner = self.inner.write().await;
        if let Some(rows) = inner.tables.get_mut(table) {
            for row in rows
                .iter_mut()
                .filter(|row| filters.iter().all(|filter| matches(row, filter)))
            {
                if let Value::Object(fields) = row {
                    merge(fields, &patch);
                }
            }
        }
        drop(inner);
        Ok(())
    }
}

fn merge(fields: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        fields.insert(key.clone(), value.clone());
    }
}

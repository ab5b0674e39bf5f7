// ABOUTME: Detached execution of remote write commands with an observable outcome channel
// ABOUTME: Failures never roll back local state; they are broadcast and kept in a bounded log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Remote Write Dispatcher
//!
//! Optimistic actions apply their local mutation first and hand the remote half
//! to [`SyncDispatcher::dispatch`], which spawns one task per command and returns
//! immediately. Each task publishes a [`SyncEvent`] when it settles. Failures are
//! additionally appended to a bounded log so callers that never subscribed can
//! still inspect what did not reach the collaborator.
//!
//! There is no retry and no cancellation: a dispatched command runs to completion.

use super::commands::RemoteOp;
use crate::backend::RemoteBackend;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Number of failures kept in the in-store log
pub const FAILURE_LOG_CAPACITY: usize = 64;

/// Buffer of the broadcast channel; slow subscribers observe `Lagged`
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// How a dispatched command settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The collaborator accepted the write
    Applied,
    /// The collaborator rejected the write or was unreachable
    Failed {
        /// Error classification
        code: ErrorCode,
        /// Error message
        message: String,
    },
}

/// Published once per dispatched command
#[derive(Debug, Clone, PartialEq)]
pub struct SyncEvent {
    /// The command
    pub op: RemoteOp,
    /// Its outcome
    pub outcome: SyncOutcome,
}

/// Entry of the bounded failure log
#[derive(Debug, Clone, PartialEq)]
pub struct SyncFailure {
    /// Operation name, see [`RemoteOp::label`]
    pub operation: &'static str,
    /// Target collection
    pub table: &'static str,
    /// Error classification
    pub code: ErrorCode,
    /// Error message
    pub message: String,
    /// When the failure was observed
    pub failed_at: DateTime<Utc>,
}

type FailureLog = Arc<Mutex<VecDeque<SyncFailure>>>;

/// Spawns remote commands on the runtime and tracks them until they settle
pub struct SyncDispatcher {
    backend: Arc<dyn RemoteBackend>,
    runtime: Handle,
    tasks: JoinSet<()>,
    events: broadcast::Sender<SyncEvent>,
    failures: FailureLog,
}

impl SyncDispatcher {
    /// Dispatcher spawning onto `runtime`
    #[must_use]
    pub fn new(backend: Arc<dyn RemoteBackend>, runtime: Handle) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            backend,
            runtime,
            tasks: JoinSet::new(),
            events,
            failures: Arc::new(Mutex::new(VecDeque::with_capacity(FAILURE_LOG_CAPACITY))),
        }
    }

    /// Dispatcher spawning onto the runtime of the calling context
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when called outside a Tokio runtime
    pub fn for_current_runtime(backend: Arc<dyn RemoteBackend>) -> AppResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| AppError::internal(format!("no async runtime: {e}")))?;
        Ok(Self::new(backend, runtime))
    }

    /// Spawn every command without waiting for any of them
    pub fn dispatch(&mut self, ops: Vec<RemoteOp>) {
        while self.tasks.try_join_next().is_some() {}

        for op in ops {
            debug!(operation = op.label(), table = op.table(), "Dispatching remote write");
            let backend = Arc::clone(&self.backend);
            let events = self.events.clone();
            let failures = Arc::clone(&self.failures);
            self.tasks.spawn_on(
                async move {
                    let outcome = match op.execute(backend.as_ref()).await {
                        Ok(()) => SyncOutcome::Applied,
                        Err(e) => {
                            AppLogger::log_sync_failure(op.label(), op.table(), &e.to_string());
                            record_failure(&failures, &op, e.code, e.to_string());
                            SyncOutcome::Failed {
                                code: e.code,
                                message: e.to_string(),
                            }
                        }
                    };
                    // No subscribers is the common case
                    let _ = events.send(SyncEvent { op, outcome });
                },
                &self.runtime,
            );
        }
    }

    /// Wait until every dispatched command has settled
    pub async fn flush(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                error!("Remote write task aborted: {e}");
            }
        }
    }

    /// Commands spawned and not yet reaped
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Subscribe to settle events of commands dispatched from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// Most recent failures, oldest first
    #[must_use]
    pub fn failures(&self) -> Vec<SyncFailure> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

fn record_failure(log: &FailureLog, op: &RemoteOp, code: ErrorCode, message: String) {
    let mut log = log.lock().unwrap_or_else(PoisonError::into_inner);
    if log.len() == FAILURE_LOG_CAPACITY {
        log.pop_front();
    }
    log.push_back(SyncFailure {
        operation: op.label(),
        table: op.table(),
        code,
        message,
        failed_at: Utc::now(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{CallKind, MemoryBackend};
    use crate::backend::UserMetadata;
    use fit28_core::constants::tables;
    use fit28_core::models::WaterLogRow;
    use uuid::Uuid;

    fn water(user_id: Uuid, amount: f64) -> RemoteOp {
        RemoteOp::InsertWaterLog(WaterLogRow {
            user_id,
            amount,
            created_at: None,
        })
    }

    #[tokio::test]
    async fn test_dispatch_publishes_applied_events() {
        let backend = Arc::new(MemoryBackend::new());
        let user = backend
            .add_account("a@example.com", "secret-pass", UserMetadata::default())
            .await;
        backend.restore_session(&user).await;

        let mut dispatcher = SyncDispatcher::for_current_runtime(backend.clone()).unwrap();
        let mut events = dispatcher.subscribe();
        dispatcher.dispatch(vec![water(user.id, 0.25), water(user.id, 0.5)]);
        dispatcher.flush().await;

        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(events.recv().await.unwrap().outcome, SyncOutcome::Applied);
        assert_eq!(events.recv().await.unwrap().outcome, SyncOutcome::Applied);
        assert_eq!(
            backend
                .call_count(CallKind::Insert, Some(tables::WATER_LOGS))
                .await,
            2
        );
        assert!(dispatcher.failures().is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_logged_not_raised() {
        let backend = Arc::new(MemoryBackend::new());
        let user = backend
            .add_account("a@example.com", "secret-pass", UserMetadata::default())
            .await;
        backend.restore_session(&user).await;
        backend.fail_writes_to(tables::WATER_LOGS).await;

        let mut dispatcher = SyncDispatcher::for_current_runtime(backend).unwrap();
        dispatcher.dispatch(vec![water(user.id, 1.0)]);
        dispatcher.flush().await;

        let failures = dispatcher.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].table, tables::WATER_LOGS);
        assert_eq!(failures[0].operation, "insert_water_log");
        assert_eq!(failures[0].code, ErrorCode::ExternalServiceError);
    }

    #[tokio::test]
    async fn test_failure_log_is_bounded() {
        let backend = Arc::new(MemoryBackend::new());
        let mut dispatcher = SyncDispatcher::for_current_runtime(backend).unwrap();
        let user_id = Uuid::new_v4();
        let ops = (0..FAILURE_LOG_CAPACITY + 6)
            .map(|i| water(user_id, f64::from(u32::try_from(i).unwrap_or(0))))
            .collect();
        dispatcher.dispatch(ops);
        dispatcher.flush().await;

        assert_eq!(dispatcher.failures().len(), FAILURE_LOG_CAPACITY);
    }
}

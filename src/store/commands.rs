// ABOUTME: Remote write commands emitted by store state transitions
// ABOUTME: Each command knows its collection and how to execute itself against a backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::backend::{insert_row, Filter, RemoteBackend};
use crate::errors::AppResult;
use fit28_core::constants::tables;
use fit28_core::models::{
    JournalRow, MindsetProgressRow, ProfilePatch, WaterLogRow, WeightLogRow, WorkoutProgressRow,
};
use uuid::Uuid;

/// Remote half of an optimistic action
///
/// The local half has already been applied when one of these exists; executing
/// it never touches in-memory state.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOp {
    /// Append a weight sample
    InsertWeightLog(WeightLogRow),
    /// Append a water intake
    InsertWaterLog(WaterLogRow),
    /// Append a journal entry
    InsertJournalEntry(JournalRow),
    /// Record a completed workout
    InsertWorkoutProgress(WorkoutProgressRow),
    /// Record a completed mindset lesson
    InsertMindsetProgress(MindsetProgressRow),
    /// Patch the user's profile row
    UpdateProfile {
        /// Profile id
        user_id: Uuid,
        /// Changed columns
        patch: ProfilePatch,
    },
}

impl RemoteOp {
    /// Target collection
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::InsertWeightLog(_) => tables::WEIGHT_LOGS,
            Self::InsertWaterLog(_) => tables::WATER_LOGS,
            Self::InsertJournalEntry(_) => tables::JOURNAL_ENTRIES,
            Self::InsertWorkoutProgress(_) => tables::USER_WORKOUT_PROGRESS,
            Self::InsertMindsetProgress(_) => tables::USER_MINDSET_PROGRESS,
            Self::UpdateProfile { .. } => tables::PROFILES,
        }
    }

    /// Short operation name used in logs and sync events
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InsertWeightLog(_) => "insert_weight_log",
            Self::InsertWaterLog(_) => "insert_water_log",
            Self::InsertJournalEntry(_) => "insert_journal_entry",
            Self::InsertWorkoutProgress(_) => "insert_workout_progress",
            Self::InsertMindsetProgress(_) => "insert_mindset_progress",
            Self::UpdateProfile { .. } => "update_profile",
        }
    }

    /// Run the operation against `backend`
    ///
    /// # Errors
    ///
    /// Returns whatever the backend reports; callers treat it as a sync failure
    pub async fn execute(&self, backend: &dyn RemoteBackend) -> AppResult<()> {
        let table = self.table();
        match self {
            Self::InsertWeightLog(row) => insert_row(backend, table, row).await.map(drop),
            Self::InsertWaterLog(row) => insert_row(backend, table, row).await.map(drop),
            Self::InsertJournalEntry(row) => insert_row(backend, table, row).await.map(drop),
            Self::InsertWorkoutProgress(row) => insert_row(backend, table, row).await.map(drop),
            Self::InsertMindsetProgress(row) => insert_row(backend, table, row).await.map(drop),
            Self::UpdateProfile { user_id, patch } => {
                let filters = [Filter::eq("id", user_id.to_string())];
                backend
                    .update(table, serde_json::to_value(patch)?, &filters)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::backend::UserMetadata;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_profile_patches_only_set_columns() {
        let backend = MemoryBackend::new();
        let user = backend
            .add_account("ana@example.com", "secret-pass", UserMetadata::default())
            .await;
        backend.restore_session(&user).await;
        backend
            .seed_row(
                tables::PROFILES,
                json!({ "id": user.id, "current_weight": 70.0, "height": 165.0 }),
            )
            .await;

        let op = RemoteOp::UpdateProfile {
            user_id: user.id,
            patch: ProfilePatch {
                current_weight: Some(68.5),
                ..ProfilePatch::default()
            },
        };
        assert_eq!(op.table(), tables::PROFILES);
        op.execute(&backend).await.unwrap();

        let rows = backend.rows(tables::PROFILES).await;
        assert_eq!(rows[0]["current_weight"], json!(68.5));
        assert_eq!(rows[0]["height"], json!(165.0));
    }

    #[tokio::test]
    async fn test_insert_requires_session() {
        let backend = MemoryBackend::new();
        let op = RemoteOp::InsertWaterLog(WaterLogRow {
            user_id: Uuid::new_v4(),
            amount: 0.5,
            created_at: None,
        });
        assert!(op.execute(&backend).await.is_err());
        assert!(backend.rows(tables::WATER_LOGS).await.is_empty());
    }
}

// ABOUTME: Row shapes of the append-only log and progress collections
// ABOUTME: Weight, water, journal and completion rows exchanged with the collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of `weight_logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLogRow {
    /// Owner
    pub user_id: Uuid,
    /// Weight in kg
    pub weight: f64,
    /// Set by the collaborator on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row of `water_logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterLogRow {
    /// Owner
    pub user_id: Uuid,
    /// Volume in liters
    pub amount: f64,
    /// Set by the collaborator on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row of `journal_entries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRow {
    /// Client-generated id, equal to the in-memory entry id
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Free text
    pub content: String,
    /// Set by the collaborator on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row of `user_workout_progress`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutProgressRow {
    /// Owner
    pub user_id: Uuid,
    /// Completed workout
    pub workout_id: u32,
}

/// Row of `user_mindset_progress`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindsetProgressRow {
    /// Owner
    pub user_id: Uuid,
    /// Completed lesson
    pub mindset_id: u32,
}

// ABOUTME: Journal entry model
// ABOUTME: Entries are kept newest-first by the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-text journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry id, shared with the remote row
    pub id: Uuid,
    /// Display label of the creation date
    pub date: String,
    /// Free text
    pub content: String,
}

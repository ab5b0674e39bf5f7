// ABOUTME: Mindset lesson model (audio or video) with completion flag
// ABOUTME: Same completion lifecycle as workouts, without a lock gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Media type of a mindset lesson
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Audio lesson
    Audio,
    /// Video lesson
    Video,
}

/// A mindset lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindsetItem {
    /// Catalog id
    pub id: u32,
    /// Title
    pub title: String,
    /// Duration label, e.g. `8 min`
    pub duration: String,
    /// Media type
    pub media_type: MediaType,
    /// Completed by the current user
    pub completed: bool,
}

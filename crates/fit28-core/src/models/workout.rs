// ABOUTME: Program workout model with difficulty, lock gate and completion flag
// ABOUTME: Lock state and completion state are independent of each other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Workout difficulty
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Suitable for first-timers
    Beginner,
    /// Some training background expected
    Intermediate,
    /// High intensity
    Advanced,
}

impl Difficulty {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// One day of the home-workout program
///
/// `is_locked` is fixed by the program tier; `completed` is the per-user
/// progress flag merged in from the session overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Catalog id
    pub id: u32,
    /// Position in the program, 1-based and contiguous
    pub day_number: u32,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Thumbnail image reference
    pub thumbnail_url: String,
    /// Video reference
    pub video_url: String,
    /// Length of the session
    pub duration_minutes: u32,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Requires premium entitlement
    pub is_locked: bool,
    /// Completed by the current user
    pub completed: bool,
}

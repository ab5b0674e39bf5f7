// ABOUTME: Badge catalog model
// ABOUTME: A user's relationship to a badge is membership of its id in earned_badges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// An achievement of the badge catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Stable id stored in the profile's earned set
    pub id: String,
    /// Title
    pub title: String,
    /// What the user did to earn it
    pub description: String,
    /// Icon name
    pub icon: String,
    /// Color token
    pub color: String,
}

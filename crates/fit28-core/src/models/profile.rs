// ABOUTME: User profile model with body metrics, photos and gamification state
// ABOUTME: Includes the remote profile row shape, partial updates and default synthesis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::profile_defaults;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// One entry of a user's weight history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    /// Display label of the day the sample was recorded
    pub date: String,
    /// Weight in kilograms
    pub weight: f64,
}

/// Which progress photo a reference belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    /// Photo taken at the start of the program
    Start,
    /// Most recent photo
    Current,
}

/// In-memory profile of the authenticated user
///
/// Built from a [`ProfileRow`] plus the weight log history during hydration.
/// Optional numeric fields of the row are always defaulted here, so derived
/// values never operate on absent data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Auth identity
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Avatar image reference
    pub avatar_url: Option<String>,
    /// Most recently logged weight
    pub current_weight_kg: f64,
    /// Weight of the earliest sample, or current weight without history
    pub starting_weight_kg: f64,
    /// Goal weight
    pub target_weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Progress photo taken at the start
    pub start_photo_url: Option<String>,
    /// Latest progress photo
    pub current_photo_url: Option<String>,
    /// Consecutive active days
    pub streak_days: u32,
    /// Ids of badges the user has earned
    pub earned_badges: BTreeSet<String>,
    /// Premium entitlement
    pub is_premium: bool,
    /// Weight samples, oldest first
    pub weight_history: Vec<WeightSample>,
}

impl UserProfile {
    /// Combine a profile row with the user's weight history
    #[must_use]
    pub fn from_row(row: ProfileRow, fallback_email: &str, weight_history: Vec<WeightSample>) -> Self {
        let current_weight_kg = row
            .current_weight
            .unwrap_or(profile_defaults::CURRENT_WEIGHT_KG);
        let starting_weight_kg = weight_history
            .first()
            .map_or(current_weight_kg, |sample| sample.weight);

        Self {
            id: row.id,
            email: row.email.unwrap_or_else(|| fallback_email.to_owned()),
            full_name: row.full_name.unwrap_or_default(),
            phone: row.phone,
            avatar_url: row.avatar_url,
            current_weight_kg,
            starting_weight_kg,
            target_weight_kg: row
                .target_weight
                .unwrap_or(profile_defaults::TARGET_WEIGHT_KG),
            height_cm: row.height.unwrap_or(profile_defaults::HEIGHT_CM),
            start_photo_url: row.start_photo_url,
            current_photo_url: row.current_photo_url,
            streak_days: row.streak_days.unwrap_or(0),
            earned_badges: row.earned_badges.unwrap_or_default().into_iter().collect(),
            is_premium: row.is_premium.unwrap_or(false),
            weight_history,
        }
    }

    /// Replace the weight history and re-derive the starting weight from it
    pub fn set_weight_history(&mut self, weight_history: Vec<WeightSample>) {
        self.starting_weight_kg = weight_history
            .first()
            .map_or(self.current_weight_kg, |sample| sample.weight);
        self.weight_history = weight_history;
    }
}

/// Row of the `profiles` collection
///
/// Every body-metric column is nullable remotely; defaults are applied by
/// [`UserProfile::from_row`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Same id as the auth user
    pub id: Uuid,
    /// Login email
    #[serde(default)]
    pub email: Option<String>,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Avatar image reference
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Current weight in kg
    #[serde(default)]
    pub current_weight: Option<f64>,
    /// Target weight in kg
    #[serde(default)]
    pub target_weight: Option<f64>,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Start progress photo
    #[serde(default)]
    pub start_photo_url: Option<String>,
    /// Current progress photo
    #[serde(default)]
    pub current_photo_url: Option<String>,
    /// Streak counter
    #[serde(default)]
    pub streak_days: Option<u32>,
    /// Earned badge ids
    #[serde(default)]
    pub earned_badges: Option<Vec<String>>,
    /// Premium entitlement
    #[serde(default)]
    pub is_premium: Option<bool>,
}

impl ProfileRow {
    /// Default row inserted when an authenticated user has no profile yet
    #[must_use]
    pub fn with_defaults(
        id: Uuid,
        email: Option<String>,
        full_name: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            id,
            email,
            full_name,
            phone,
            avatar_url: None,
            current_weight: Some(profile_defaults::CURRENT_WEIGHT_KG),
            target_weight: Some(profile_defaults::TARGET_WEIGHT_KG),
            height: Some(profile_defaults::HEIGHT_CM),
            start_photo_url: None,
            current_photo_url: None,
            streak_days: Some(0),
            earned_badges: Some(Vec::new()),
            is_premium: Some(false),
        }
    }
}

/// Partial update of a profile row; unset fields are left untouched remotely
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// New current weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    /// New target weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    /// New height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New start photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_photo_url: Option<String>,
    /// New current photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_photo_url: Option<String>,
    /// Full replacement of the earned badge set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned_badges: Option<Vec<String>>,
}

impl ProfilePatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current_weight.is_none()
            && self.target_weight.is_none()
            && self.height.is_none()
            && self.start_photo_url.is_none()
            && self.current_photo_url.is_none()
            && self.earned_badges.is_none()
    }
}

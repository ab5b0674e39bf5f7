// ABOUTME: Values computed on read from the application state
// ABOUTME: BMI, program progress, next workout and badge, weekly report, transformation summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Derived Values
//!
//! Nothing here is stored. Every value is recomputed from [`AppState`] when read,
//! so it can never drift from the data it summarizes.

use super::state::AppState;
use fit28_core::constants::program::WEEKLY_SAMPLE_WINDOW;
use fit28_core::constants::round_one_decimal;
use fit28_core::models::{Badge, Workout};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (exclusive) of the underweight band
const BMI_UNDERWEIGHT_BELOW: f64 = 18.5;
/// Upper bound (exclusive) of the healthy band
const BMI_HEALTHY_BELOW: f64 = 24.9;
/// Upper bound (exclusive) of the overweight band
const BMI_OVERWEIGHT_BELOW: f64 = 29.9;

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 up to 24.9
    Healthy,
    /// 24.9 up to 29.9
    Overweight,
    /// 29.9 and above
    Obese,
}

impl BmiCategory {
    /// Band containing `bmi`
    #[must_use]
    pub fn from_value(bmi: f64) -> Self {
        if bmi < BMI_UNDERWEIGHT_BELOW {
            Self::Underweight
        } else if bmi < BMI_HEALTHY_BELOW {
            Self::Healthy
        } else if bmi < BMI_OVERWEIGHT_BELOW {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        };
        f.write_str(label)
    }
}

/// Body mass index with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bmi {
    /// BMI rounded to one decimal
    pub value: f64,
    /// Category of the unrounded value
    pub category: BmiCategory,
}

/// Calculate Body Mass Index
///
/// Formula: BMI = weight / (height / 100)²
///
/// # Arguments
/// * `weight_kg` - Body weight in kilograms
/// * `height_cm` - Height in centimeters
///
/// Returns `None` for a non-positive height.
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<Bmi> {
    if height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some(Bmi {
        value: round_one_decimal(bmi),
        category: BmiCategory::from_value(bmi),
    })
}

/// Completed share of the program as a whole percentage; an empty program is 0%
#[must_use]
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed.min(total) as f64 / total as f64) * 100.0).round() as u32
}

/// Whether a workout can be opened by the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutAccess {
    /// Free workout, or the user is premium
    Open,
    /// Locked workout and the user is not premium
    Upsell,
    /// No such workout
    NotFound,
}

/// Seven-day summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Completed program workouts
    pub workouts_completed: usize,
    /// Program completion percentage
    pub program_percent: u32,
    /// Last minus first of the most recent samples; `None` without samples
    pub weight_change_kg: Option<f64>,
    /// Liters logged today
    pub water_today_liters: f64,
    /// Journal entries written
    pub journal_entries: usize,
    /// Badges earned
    pub badges_earned: usize,
}

/// Before/after comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationSummary {
    /// First logged weight, or current weight without history
    pub starting_weight_kg: f64,
    /// Current weight
    pub current_weight_kg: f64,
    /// Target weight
    pub target_weight_kg: f64,
    /// Current minus starting weight
    pub change_kg: f64,
    /// Distance between current and target weight
    pub remaining_kg: f64,
    /// Share of the start-to-target distance covered, clamped to 0..=100
    pub progress_percent: u32,
    /// Start photo
    pub start_photo_url: Option<String>,
    /// Current photo
    pub current_photo_url: Option<String>,
}

/// Share of the distance from `start` to `target` covered by `current`
fn goal_progress_percent(start: f64, current: f64, target: f64) -> u32 {
    let distance = start - target;
    if distance.abs() < f64::EPSILON {
        return if (current - target).abs() < f64::EPSILON {
            100
        } else {
            0
        };
    }
    (((start - current) / distance) * 100.0)
        .clamp(0.0, 100.0)
        .round() as u32
}

impl AppState {
    /// BMI of the signed-in user
    #[must_use]
    pub fn bmi(&self) -> Option<Bmi> {
        self.user()
            .and_then(|user| calculate_bmi(user.current_weight_kg, user.height_cm))
    }

    /// Program completion percentage
    #[must_use]
    pub fn program_progress_percent(&self) -> u32 {
        progress_percent(
            self.completed_workout_count(),
            self.catalog().workouts().len(),
        )
    }

    /// First workout in day order that is not completed
    #[must_use]
    pub fn next_workout(&self) -> Option<Workout> {
        self.workouts().into_iter().find(|workout| !workout.completed)
    }

    /// First catalog badge the user has not earned
    #[must_use]
    pub fn next_badge(&self) -> Option<&Badge> {
        let earned = self.user().map(|user| &user.earned_badges);
        self.catalog()
            .badges()
            .iter()
            .find(|badge| !earned.is_some_and(|earned| earned.contains(&badge.id)))
    }

    /// Whether workout `id` opens or sends the user to the upsell screen
    #[must_use]
    pub fn workout_access(&self, id: u32) -> WorkoutAccess {
        let Some(workout) = self.catalog().workout(id) else {
            return WorkoutAccess::NotFound;
        };
        let premium = self.user().is_some_and(|user| user.is_premium);
        if workout.is_locked && !premium {
            WorkoutAccess::Upsell
        } else {
            WorkoutAccess::Open
        }
    }

    /// Seven-day summary of the signed-in user; `None` while signed out
    #[must_use]
    pub fn weekly_report(&self) -> Option<WeeklyReport> {
        let user = self.user()?;
        let history = &user.weight_history;
        let recent = &history[history.len().saturating_sub(WEEKLY_SAMPLE_WINDOW)..];
        let weight_change_kg = match (recent.first(), recent.last()) {
            (Some(first), Some(last)) => Some(round_one_decimal(last.weight - first.weight)),
            _ => None,
        };

        Some(WeeklyReport {
            workouts_completed: self.completed_workout_count(),
            program_percent: self.program_progress_percent(),
            weight_change_kg,
            water_today_liters: self.water_today_liters(),
            journal_entries: self.journal().len(),
            badges_earned: self.earned_badges().len(),
        })
    }

    /// Before/after comparison of the signed-in user; `None` while signed out
    #[must_use]
    pub fn transformation(&self) -> Option<TransformationSummary> {
        let user = self.user()?;
        Some(TransformationSummary {
            starting_weight_kg: user.starting_weight_kg,
            current_weight_kg: user.current_weight_kg,
            target_weight_kg: user.target_weight_kg,
            change_kg: round_one_decimal(user.current_weight_kg - user.starting_weight_kg),
            remaining_kg: round_one_decimal((user.current_weight_kg - user.target_weight_kg).abs()),
            progress_percent: goal_progress_percent(
                user.starting_weight_kg,
                user.current_weight_kg,
                user.target_weight_kg,
            ),
            start_photo_url: user.start_photo_url.clone(),
            current_photo_url: user.current_photo_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_overweight_band() {
        let bmi = calculate_bmi(68.0, 160.0).unwrap();
        assert!((bmi.value - 26.6).abs() < f64::EPSILON);
        assert_eq!(bmi.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_bmi_category_uses_unrounded_value() {
        // 24.88 rounds to 24.9 but is still in the healthy band
        let bmi = calculate_bmi(63.7, 160.0).unwrap();
        assert!((bmi.value - 24.9).abs() < f64::EPSILON);
        assert_eq!(bmi.category, BmiCategory::Healthy);
    }

    #[test]
    fn test_bmi_band_edges() {
        assert_eq!(BmiCategory::from_value(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Healthy);
        assert_eq!(BmiCategory::from_value(24.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.9), BmiCategory::Obese);
    }

    #[test]
    fn test_bmi_rejects_non_positive_height() {
        assert!(calculate_bmi(60.0, 0.0).is_none());
        assert!(calculate_bmi(60.0, -170.0).is_none());
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(7, 28), 25);
        assert_eq!(progress_percent(0, 28), 0);
        assert_eq!(progress_percent(28, 28), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_goal_progress_is_clamped() {
        assert_eq!(goal_progress_percent(70.0, 65.0, 60.0), 50);
        assert_eq!(goal_progress_percent(70.0, 72.0, 60.0), 0);
        assert_eq!(goal_progress_percent(70.0, 58.0, 60.0), 100);
        assert_eq!(goal_progress_percent(60.0, 60.0, 60.0), 100);
    }
}

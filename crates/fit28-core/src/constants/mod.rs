// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Profile defaults, remote collection names, badge ids and numeric helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than collected in a single flat list.

/// Defaults applied when a remote profile row lacks body metrics
pub mod profile_defaults {
    /// Current weight used when the profile row has none
    pub const CURRENT_WEIGHT_KG: f64 = 60.0;
    /// Target weight used when the profile row has none
    pub const TARGET_WEIGHT_KG: f64 = 55.0;
    /// Height used when the profile row has none
    pub const HEIGHT_CM: f64 = 160.0;
}

/// Names of the collections exposed by the remote collaborator
pub mod tables {
    /// One row per user, keyed by the auth user id
    pub const PROFILES: &str = "profiles";
    /// Append-only weight samples
    pub const WEIGHT_LOGS: &str = "weight_logs";
    /// Append-only water volumes
    pub const WATER_LOGS: &str = "water_logs";
    /// Free-text journal entries
    pub const JOURNAL_ENTRIES: &str = "journal_entries";
    /// Completed workout markers
    pub const USER_WORKOUT_PROGRESS: &str = "user_workout_progress";
    /// Completed mindset lesson markers
    pub const USER_MINDSET_PROGRESS: &str = "user_mindset_progress";
}

/// Badge identifiers of the built-in catalog
pub mod badge_ids {
    /// First workout completed
    pub const FIRST_STEP: &str = "first_step";
    /// First weight sample logged
    pub const FIRST_WEIGH_IN: &str = "first_weigh_in";
    /// Daily water goal reached
    pub const HYDRATED: &str = "hydrated";
    /// First journal entry written
    pub const REFLECTIVE: &str = "reflective";
    /// First mindset lesson completed
    pub const MINDFUL: &str = "mindful";
    /// Seven workouts completed
    pub const WEEK_ONE: &str = "week_one";
    /// Fourteen workouts completed
    pub const HALFWAY: &str = "halfway";
    /// Whole program completed
    pub const FINISHER: &str = "finisher";
}

/// Program and tracking limits
pub mod program {
    /// Length of the home-workout program in days
    pub const PROGRAM_DAYS: u32 = 28;
    /// Days available without premium entitlement
    pub const FREE_DAYS: u32 = 7;
    /// Daily water volume that unlocks the hydration badge
    pub const DAILY_WATER_GOAL_LITERS: f64 = 2.0;
    /// Samples considered by the weekly report
    pub const WEEKLY_SAMPLE_WINDOW: usize = 7;
}

/// Display formats for the date labels stored alongside samples
pub mod date_formats {
    /// Weight history label, e.g. `Oct 19`
    pub const WEIGHT_SAMPLE: &str = "%b %-d";
    /// Journal entry label, e.g. `Oct 19, 2026`
    pub const JOURNAL_ENTRY: &str = "%b %-d, %Y";
}

/// Round to one decimal place
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places, used for running liter totals
#[must_use]
pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_one_decimal() {
        assert!((round_one_decimal(0.75) - 0.8).abs() < f64::EPSILON);
        assert!((round_one_decimal(26.5625) - 26.6).abs() < f64::EPSILON);
        assert!((round_one_decimal(0.1 + 0.2) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_two_decimals_clears_float_noise() {
        assert!((round_two_decimals(0.1 + 0.2) - 0.3).abs() < f64::EPSILON);
        assert!((round_two_decimals(0.25 + 0.5) - 0.75).abs() < f64::EPSILON);
    }
}

// ABOUTME: Badge unlock rules evaluated against the session's progress counters
// ABOUTME: Badges are only ever added, never revoked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::catalog::Catalog;
use fit28_core::constants::{badge_ids, program};
use std::collections::BTreeSet;

/// Counters the unlock rules look at
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BadgeInputs {
    /// Completed program workouts
    pub completed_workouts: usize,
    /// Completed mindset lessons
    pub completed_mindset: usize,
    /// Logged weight samples
    pub weight_samples: usize,
    /// Journal entries
    pub journal_entries: usize,
    /// Water logged today, liters
    pub water_today_liters: f64,
}

/// Whether the rule attached to `badge_id` holds; unknown ids never unlock
#[must_use]
pub fn is_unlocked(badge_id: &str, inputs: &BadgeInputs) -> bool {
    match badge_id {
        badge_ids::FIRST_STEP => inputs.completed_workouts >= 1,
        badge_ids::WEEK_ONE => inputs.completed_workouts >= 7,
        badge_ids::HALFWAY => inputs.completed_workouts >= 14,
        badge_ids::FINISHER => inputs.completed_workouts >= program::PROGRAM_DAYS as usize,
        badge_ids::FIRST_WEIGH_IN => inputs.weight_samples >= 1,
        badge_ids::REFLECTIVE => inputs.journal_entries >= 1,
        badge_ids::HYDRATED => inputs.water_today_liters >= program::DAILY_WATER_GOAL_LITERS,
        badge_ids::MINDFUL => inputs.completed_mindset >= 1,
        _ => false,
    }
}

/// Catalog badges whose rule holds but which are not in `earned` yet, in catalog order
#[must_use]
pub fn newly_earned<'a>(
    catalog: &'a Catalog,
    earned: &BTreeSet<String>,
    inputs: &BadgeInputs,
) -> Vec<&'a str> {
    catalog
        .badges()
        .iter()
        .map(|badge| badge.id.as_str())
        .filter(|id| !earned.contains(*id) && is_unlocked(id, inputs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_milestones() {
        let mut inputs = BadgeInputs::default();
        assert!(!is_unlocked(badge_ids::FIRST_STEP, &inputs));

        inputs.completed_workouts = 7;
        assert!(is_unlocked(badge_ids::FIRST_STEP, &inputs));
        assert!(is_unlocked(badge_ids::WEEK_ONE, &inputs));
        assert!(!is_unlocked(badge_ids::HALFWAY, &inputs));

        inputs.completed_workouts = 28;
        assert!(is_unlocked(badge_ids::FINISHER, &inputs));
    }

    #[test]
    fn test_hydration_threshold_is_inclusive() {
        let inputs = BadgeInputs {
            water_today_liters: 2.0,
            ..BadgeInputs::default()
        };
        assert!(is_unlocked(badge_ids::HYDRATED, &inputs));
        assert!(!is_unlocked("no_such_badge", &inputs));
    }

    #[test]
    fn test_newly_earned_skips_already_earned() {
        let catalog = Catalog::builtin();
        let inputs = BadgeInputs {
            completed_workouts: 1,
            weight_samples: 1,
            ..BadgeInputs::default()
        };
        let earned: BTreeSet<String> = [badge_ids::FIRST_STEP.to_owned()].into();

        assert_eq!(
            newly_earned(&catalog, &earned, &inputs),
            vec![badge_ids::FIRST_WEIGH_IN]
        );
        assert_eq!(
            newly_earned(&catalog, &BTreeSet::new(), &inputs),
            vec![badge_ids::FIRST_STEP, badge_ids::FIRST_WEIGH_IN]
        );
    }
}

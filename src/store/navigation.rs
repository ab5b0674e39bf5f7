// ABOUTME: Screen state machine driven by the store
// ABOUTME: Guards authenticated screens and the workout details selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named screens of the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Login / registration entry point
    #[default]
    Auth,
    /// Main screen after authentication
    Dashboard,
    /// 28-day program overview
    Program,
    /// Recipe library
    Recipes,
    /// One selected workout
    WorkoutDetails,
    /// Mindset lessons
    Mindset,
    /// Journal entries
    JournalHistory,
    /// Before/after comparison
    Transformation,
    /// Weekly summary
    WeeklyReport,
    /// Profile and body stats
    Profile,
    /// Premium upsell
    Upsell,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auth => "auth",
            Self::Dashboard => "dashboard",
            Self::Program => "program",
            Self::Recipes => "recipes",
            Self::WorkoutDetails => "workout_details",
            Self::Mindset => "mindset",
            Self::JournalHistory => "journal_history",
            Self::Transformation => "transformation",
            Self::WeeklyReport => "weekly_report",
            Self::Profile => "profile",
            Self::Upsell => "upsell",
        };
        f.write_str(name)
    }
}

/// Current screen plus the workout selected for the details screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    screen: Screen,
    selected_workout: Option<u32>,
}

impl Navigation {
    /// Screen currently shown
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Workout targeted by the details screen
    #[must_use]
    pub const fn selected_workout(&self) -> Option<u32> {
        self.selected_workout
    }

    /// Point the details screen at a workout; does not change the screen
    pub fn select_workout(&mut self, id: u32) {
        self.selected_workout = Some(id);
    }

    /// Move to `screen`
    ///
    /// # Errors
    ///
    /// `AuthRequired` for any screen but `Auth` while signed out, and
    /// `InvalidState` for `WorkoutDetails` without a selected workout
    pub fn navigate(&mut self, screen: Screen, authenticated: bool) -> AppResult<()> {
        if screen != Screen::Auth && !authenticated {
            return Err(AppError::auth_required().with_resource(screen.to_string()));
        }
        if screen == Screen::WorkoutDetails && self.selected_workout.is_none() {
            return Err(AppError::invalid_state("no workout selected"));
        }
        self.screen = screen;
        Ok(())
    }

    /// Unconditional move to the dashboard after a successful sign-in
    pub(crate) fn enter_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
    }

    /// Back to the unauthenticated entry point, forgetting the selection
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_initial_screen_is_auth() {
        let nav = Navigation::default();
        assert_eq!(nav.screen(), Screen::Auth);
        assert_eq!(nav.selected_workout(), None);
    }

    #[test]
    fn test_signed_out_navigation_is_rejected() {
        let mut nav = Navigation::default();
        let err = nav.navigate(Screen::Dashboard, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(nav.screen(), Screen::Auth);

        assert!(nav.navigate(Screen::Auth, false).is_ok());
    }

    #[test]
    fn test_workout_details_requires_selection() {
        let mut nav = Navigation::default();
        let err = nav.navigate(Screen::WorkoutDetails, true).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        nav.select_workout(3);
        assert_eq!(nav.screen(), Screen::Auth);
        nav.navigate(Screen::WorkoutDetails, true).unwrap();
        assert_eq!(nav.screen(), Screen::WorkoutDetails);
    }

    #[test]
    fn test_reset_forgets_selection() {
        let mut nav = Navigation::default();
        nav.select_workout(5);
        nav.enter_dashboard();
        nav.reset();
        assert_eq!(nav, Navigation::default());
    }
}

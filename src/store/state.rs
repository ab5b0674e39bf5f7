// ABOUTME: Session-scoped application state and its synchronous transitions
// ABOUTME: Every optimistic action mutates local state and returns the remote commands to run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Application State
//!
//! [`AppState::apply`] is the only way user actions change state. It runs
//! without I/O: the local half of an action is applied before it returns and the
//! remote half comes back as a list of [`RemoteOp`] for the outer shell to
//! dispatch. Nothing here ever rolls a local change back.
//!
//! Per-user progress lives in a [`SessionOverlay`] of completed ids, merged with
//! the shared [`Catalog`] at read time.

use super::badges::{self, BadgeInputs};
use super::commands::RemoteOp;
use super::navigation::{Navigation, Screen};
use crate::backend::AuthUser;
use crate::catalog::Catalog;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};
use fit28_core::constants::{date_formats, round_two_decimals};
use fit28_core::models::{
    Badge, JournalEntry, JournalRow, MindsetItem, MindsetProgressRow, PhotoKind, ProfilePatch,
    ProfileRow, UserProfile, WaterLogRow, WeightLogRow, WeightSample, Workout, WorkoutProgressRow,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Local UI theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Per-user completion sets keyed by catalog id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOverlay {
    /// Completed workout ids
    pub completed_workouts: BTreeSet<u32>,
    /// Completed mindset lesson ids
    pub completed_mindset: BTreeSet<u32>,
}

/// User action with an optimistic local effect
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Flip a workout's completion flag
    ToggleCompleteWorkout(u32),
    /// Flip a mindset lesson's completion flag
    ToggleCompleteMindset(u32),
    /// Record a new body weight in kg
    LogWeight(f64),
    /// Add liters to today's water total
    LogWater(f64),
    /// Write a journal entry
    LogJournal(String),
    /// Overwrite the body stats
    UpdateProfileStats {
        /// Height in cm
        height_cm: f64,
        /// Target weight in kg
        target_weight_kg: f64,
        /// Current weight in kg
        current_weight_kg: f64,
    },
    /// Replace a progress photo reference
    UpdateProgressPhoto {
        /// Which photo
        kind: PhotoKind,
        /// New image reference
        url: String,
    },
    /// Flip the UI theme
    ToggleTheme,
    /// Dismiss the newly unlocked badge notice
    ClearNewBadge,
}

/// Result of the remote fetches made while hydrating a session
///
/// `None` marks a fetch that failed; the matching slice of state keeps its
/// prior value instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrationSnapshot {
    /// Profile row, fetched or freshly created
    pub profile: Option<ProfileRow>,
    /// Weight samples, oldest first
    pub weight_history: Option<Vec<WeightSample>>,
    /// Liters logged since local midnight
    pub water_today_liters: Option<f64>,
    /// Journal entries, newest first
    pub journal: Option<Vec<JournalEntry>>,
    /// Completed workout ids
    pub completed_workouts: Option<BTreeSet<u32>>,
    /// Completed mindset lesson ids
    pub completed_mindset: Option<BTreeSet<u32>>,
}

/// Everything the presentation layer reads
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    user: Option<UserProfile>,
    /// Whether `user` reflects a profile row read from the collaborator
    profile_loaded: bool,
    overlay: SessionOverlay,
    water_today_liters: f64,
    journal: Vec<JournalEntry>,
    navigation: Navigation,
    theme: Theme,
    new_badge: Option<String>,
}

impl AppState {
    /// Signed-out state on the `Auth` screen
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            user: None,
            profile_loaded: false,
            overlay: SessionOverlay::default(),
            water_today_liters: 0.0,
            journal: Vec::new(),
            navigation: Navigation::default(),
            theme: Theme::default(),
            new_badge: None,
        }
    }

    /// Shared reference data
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Signed-in user's profile
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Whether a user is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Per-user completion sets
    #[must_use]
    pub const fn overlay(&self) -> &SessionOverlay {
        &self.overlay
    }

    /// Liters logged today
    #[must_use]
    pub const fn water_today_liters(&self) -> f64 {
        self.water_today_liters
    }

    /// Journal, newest first
    #[must_use]
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Navigation pointer
    #[must_use]
    pub const fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Current screen
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.navigation.screen()
    }

    /// UI theme
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Badge unlocked by the most recent action, until dismissed
    #[must_use]
    pub fn new_badge(&self) -> Option<&Badge> {
        self.new_badge
            .as_deref()
            .and_then(|id| self.catalog.badge(id))
    }

    /// Catalog workouts with the user's completion merged in, in day order
    #[must_use]
    pub fn workouts(&self) -> Vec<Workout> {
        self.catalog
            .workouts()
            .iter()
            .map(|workout| Workout {
                completed: self.overlay.completed_workouts.contains(&workout.id),
                ..workout.clone()
            })
            .collect()
    }

    /// One workout with the user's completion merged in
    #[must_use]
    pub fn workout(&self, id: u32) -> Option<Workout> {
        self.catalog.workout(id).map(|workout| Workout {
            completed: self.overlay.completed_workouts.contains(&id),
            ..workout.clone()
        })
    }

    /// Catalog mindset lessons with the user's completion merged in
    #[must_use]
    pub fn mindset_items(&self) -> Vec<MindsetItem> {
        self.catalog
            .mindset()
            .iter()
            .map(|item| MindsetItem {
                completed: self.overlay.completed_mindset.contains(&item.id),
                ..item.clone()
            })
            .collect()
    }

    /// Badges the user has earned, in catalog order
    #[must_use]
    pub fn earned_badges(&self) -> Vec<&Badge> {
        let Some(user) = &self.user else {
            return Vec::new();
        };
        self.catalog
            .badges()
            .iter()
            .filter(|badge| user.earned_badges.contains(&badge.id))
            .collect()
    }

    /// Number of completed workouts that exist in the program
    #[must_use]
    pub fn completed_workout_count(&self) -> usize {
        self.overlay
            .completed_workouts
            .iter()
            .filter(|id| self.catalog.workout(**id).is_some())
            .count()
    }

    /// Move to `screen`, see [`Navigation::navigate`]
    ///
    /// # Errors
    ///
    /// Rejects authenticated screens while signed out and the details screen
    /// without a selection
    pub fn navigate(&mut self, screen: Screen) -> AppResult<()> {
        let authenticated = self.is_authenticated();
        self.navigation.navigate(screen, authenticated)
    }

    /// Point the details screen at a workout
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the program has no such workout
    pub fn select_workout(&mut self, id: u32) -> AppResult<()> {
        if self.catalog.workout(id).is_none() {
            return Err(AppError::not_found(format!("workout {id}")));
        }
        self.navigation.select_workout(id);
        Ok(())
    }

    /// Apply the local half of `action` and return its remote half
    ///
    /// `now` stamps date labels of new samples and journal entries.
    ///
    /// # Errors
    ///
    /// `AuthRequired` for user-data actions while signed out and
    /// `ResourceNotFound` for unknown catalog ids; state is untouched on error
    pub fn apply(&mut self, action: Action, now: DateTime<Local>) -> AppResult<Vec<RemoteOp>> {
        let mut ops = match action {
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                return Ok(Vec::new());
            }
            Action::ClearNewBadge => {
                self.new_badge = None;
                return Ok(Vec::new());
            }
            Action::ToggleCompleteWorkout(id) => self.toggle_workout(id, now)?,
            Action::ToggleCompleteMindset(id) => self.toggle_mindset(id)?,
            Action::LogWeight(weight) => self.log_weight(weight, now)?,
            Action::LogWater(liters) => self.log_water(liters)?,
            Action::LogJournal(text) => vec![self.log_journal(text, now)?],
            Action::UpdateProfileStats {
                height_cm,
                target_weight_kg,
                current_weight_kg,
            } => self.update_stats(height_cm, target_weight_kg, current_weight_kg)?,
            Action::UpdateProgressPhoto { kind, url } => self.update_photo(kind, url)?,
        };
        ops.extend(self.award_badges());
        Ok(ops)
    }

    fn user_id(&self) -> AppResult<Uuid> {
        self.user
            .as_ref()
            .map(|user| user.id)
            .ok_or_else(AppError::auth_required)
    }

    fn profile_mut(&mut self) -> AppResult<&mut UserProfile> {
        self.user.as_mut().ok_or_else(AppError::auth_required)
    }

    fn toggle_workout(&mut self, id: u32, now: DateTime<Local>) -> AppResult<Vec<RemoteOp>> {
        let user_id = self.user_id()?;
        let catalog = Arc::clone(&self.catalog);
        let workout = catalog
            .workout(id)
            .ok_or_else(|| AppError::not_found(format!("workout {id}")))?;

        if !self.overlay.completed_workouts.insert(id) {
            self.overlay.completed_workouts.remove(&id);
            debug!(workout_id = id, "Workout marked incomplete locally");
            return Ok(Vec::new());
        }

        debug!(workout_id = id, "Workout completed");
        let journal = self.log_journal(
            format!("Completed Day {}: {}", workout.day_number, workout.title),
            now,
        )?;
        Ok(vec![
            RemoteOp::InsertWorkoutProgress(WorkoutProgressRow {
                user_id,
                workout_id: id,
            }),
            journal,
        ])
    }

    fn toggle_mindset(&mut self, id: u32) -> AppResult<Vec<RemoteOp>> {
        let user_id = self.user_id()?;
        if self.catalog.mindset_item(id).is_none() {
            return Err(AppError::not_found(format!("mindset item {id}")));
        }

        if !self.overlay.completed_mindset.insert(id) {
            self.overlay.completed_mindset.remove(&id);
            return Ok(Vec::new());
        }
        Ok(vec![RemoteOp::InsertMindsetProgress(MindsetProgressRow {
            user_id,
            mindset_id: id,
        })])
    }

    fn log_weight(&mut self, weight: f64, now: DateTime<Local>) -> AppResult<Vec<RemoteOp>> {
        let profile = self.profile_mut()?;
        profile.weight_history.push(WeightSample {
            date: now.format(date_formats::WEIGHT_SAMPLE).to_string(),
            weight,
        });
        if profile.weight_history.len() == 1 {
            profile.starting_weight_kg = weight;
        }
        profile.current_weight_kg = weight;
        debug!(weight, samples = profile.weight_history.len(), "Weight logged");

        let user_id = profile.id;
        Ok(vec![
            RemoteOp::InsertWeightLog(WeightLogRow {
                user_id,
                weight,
                created_at: None,
            }),
            RemoteOp::UpdateProfile {
                user_id,
                patch: ProfilePatch {
                    current_weight: Some(weight),
                    ..ProfilePatch::default()
                },
            },
        ])
    }

    fn log_water(&mut self, liters: f64) -> AppResult<Vec<RemoteOp>> {
        let user_id = self.user_id()?;
        self.water_today_liters = round_two_decimals(self.water_today_liters + liters);
        debug!(liters, total = self.water_today_liters, "Water logged");
        Ok(vec![RemoteOp::InsertWaterLog(WaterLogRow {
            user_id,
            amount: liters,
            created_at: None,
        })])
    }

    fn log_journal(&mut self, content: String, now: DateTime<Local>) -> AppResult<RemoteOp> {
        let user_id = self.user_id()?;
        let id = Uuid::new_v4();
        self.journal.insert(
            0,
            JournalEntry {
                id,
                date: now.format(date_formats::JOURNAL_ENTRY).to_string(),
                content: content.clone(),
            },
        );
        Ok(RemoteOp::InsertJournalEntry(JournalRow {
            id,
            user_id,
            content,
            created_at: None,
        }))
    }

    fn update_stats(
        &mut self,
        height_cm: f64,
        target_weight_kg: f64,
        current_weight_kg: f64,
    ) -> AppResult<Vec<RemoteOp>> {
        let profile = self.profile_mut()?;
        profile.height_cm = height_cm;
        profile.target_weight_kg = target_weight_kg;
        profile.current_weight_kg = current_weight_kg;
        Ok(vec![RemoteOp::UpdateProfile {
            user_id: profile.id,
            patch: ProfilePatch {
                height: Some(height_cm),
                target_weight: Some(target_weight_kg),
                current_weight: Some(current_weight_kg),
                ..ProfilePatch::default()
            },
        }])
    }

    fn update_photo(&mut self, kind: PhotoKind, url: String) -> AppResult<Vec<RemoteOp>> {
        let profile = self.profile_mut()?;
        let patch = match kind {
            PhotoKind::Start => {
                profile.start_photo_url = Some(url.clone());
                ProfilePatch {
                    start_photo_url: Some(url),
                    ..ProfilePatch::default()
                }
            }
            PhotoKind::Current => {
                profile.current_photo_url = Some(url.clone());
                ProfilePatch {
                    current_photo_url: Some(url),
                    ..ProfilePatch::default()
                }
            }
        };
        Ok(vec![RemoteOp::UpdateProfile {
            user_id: profile.id,
            patch,
        }])
    }

    fn badge_inputs(&self) -> BadgeInputs {
        BadgeInputs {
            completed_workouts: self.completed_workout_count(),
            completed_mindset: self.overlay.completed_mindset.len(),
            weight_samples: self.user.as_ref().map_or(0, |user| user.weight_history.len()),
            journal_entries: self.journal.len(),
            water_today_liters: self.water_today_liters,
        }
    }

    /// Earn every badge whose rule now holds and persist the grown set
    ///
    /// The patch replaces the remote set, so it is only sent once the remote
    /// row has been read; until then awards stay local.
    fn award_badges(&mut self) -> Option<RemoteOp> {
        let inputs = self.badge_inputs();
        let catalog = Arc::clone(&self.catalog);
        let profile = self.user.as_mut()?;
        let earned = badges::newly_earned(&catalog, &profile.earned_badges, &inputs);
        let last = (*earned.last()?).to_owned();

        profile
            .earned_badges
            .extend(earned.iter().map(|id| (*id).to_owned()));
        debug!(badges = ?earned, "Badges earned");
        self.new_badge = Some(last);

        if !self.profile_loaded {
            debug!("Profile row not loaded, badge awards kept local");
            return None;
        }
        Some(RemoteOp::UpdateProfile {
            user_id: profile.id,
            patch: ProfilePatch {
                earned_badges: Some(profile.earned_badges.iter().cloned().collect()),
                ..ProfilePatch::default()
            },
        })
    }

    /// Install the result of hydrating `auth`
    ///
    /// Slices whose fetch failed keep their prior value when the prior value
    /// belongs to the same user, and start empty otherwise. Badge rules are
    /// evaluated against the hydrated state; the returned commands persist any
    /// award.
    pub fn apply_hydration(
        &mut self,
        auth: &AuthUser,
        snapshot: HydrationSnapshot,
    ) -> Vec<RemoteOp> {
        let same_user = self.user.as_ref().is_some_and(|user| user.id == auth.id);
        let prior = if same_user { self.user.take() } else { None };
        if !same_user {
            self.profile_loaded = false;
            self.overlay = SessionOverlay::default();
            self.water_today_liters = 0.0;
            self.journal.clear();
            self.new_badge = None;
        }
        if snapshot.profile.is_some() {
            self.profile_loaded = true;
        }

        let mut profile = match (snapshot.profile, prior) {
            (Some(row), prior) => UserProfile::from_row(
                row,
                &auth.email,
                prior.map_or_else(Vec::new, |prior| prior.weight_history),
            ),
            (None, Some(prior)) => prior,
            (None, None) => UserProfile::from_row(
                ProfileRow::with_defaults(
                    auth.id,
                    Some(auth.email.clone()),
                    auth.metadata.full_name.clone(),
                    auth.metadata.phone.clone(),
                ),
                &auth.email,
                Vec::new(),
            ),
        };
        if let Some(history) = snapshot.weight_history {
            profile.set_weight_history(history);
        }
        self.user = Some(profile);

        if let Some(liters) = snapshot.water_today_liters {
            self.water_today_liters = round_two_decimals(liters);
        }
        if let Some(journal) = snapshot.journal {
            self.journal = journal;
        }
        if let Some(completed) = snapshot.completed_workouts {
            self.overlay.completed_workouts = completed;
        }
        if let Some(completed) = snapshot.completed_mindset {
            self.overlay.completed_mindset = completed;
        }

        self.award_badges().into_iter().collect()
    }

    /// Enter the dashboard after a successful sign-in
    pub(crate) fn enter_dashboard(&mut self) {
        self.navigation.enter_dashboard();
    }

    /// Drop every session-scoped value and return to `Auth`; the theme survives
    pub fn clear_session(&mut self) {
        self.user = None;
        self.profile_loaded = false;
        self.overlay = SessionOverlay::default();
        self.water_today_liters = 0.0;
        self.journal.clear();
        self.new_badge = None;
        self.navigation.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::UserMetadata;
    use crate::errors::ErrorCode;
    use chrono::TimeZone;
    use fit28_core::constants::{badge_ids, profile_defaults};

    fn auth_user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "sam@example.com".to_owned(),
            metadata: UserMetadata {
                full_name: Some("Sam Rivera".to_owned()),
                phone: None,
            },
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    fn profile_row(auth: &AuthUser) -> ProfileRow {
        ProfileRow::with_defaults(
            auth.id,
            Some(auth.email.clone()),
            auth.metadata.full_name.clone(),
            None,
        )
    }

    fn signed_in() -> (AppState, AuthUser) {
        let auth = auth_user();
        let mut state = AppState::new(Arc::new(Catalog::builtin()));
        let ops = state.apply_hydration(
            &auth,
            HydrationSnapshot {
                profile: Some(profile_row(&auth)),
                ..HydrationSnapshot::default()
            },
        );
        assert!(ops.is_empty());
        (state, auth)
    }

    fn has_badge_patch(ops: &[RemoteOp]) -> bool {
        ops.iter().any(
            |op| matches!(op, RemoteOp::UpdateProfile { patch, .. } if patch.earned_badges.is_some()),
        )
    }

    #[test]
    fn test_actions_require_user() {
        let mut state = AppState::new(Arc::new(Catalog::builtin()));
        let err = state.apply(Action::LogWater(0.5), now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert!(state.water_today_liters().abs() < f64::EPSILON);

        assert!(state.apply(Action::ToggleTheme, now()).unwrap().is_empty());
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_failed_profile_fetch_uses_defaults_and_metadata() {
        let auth = auth_user();
        let mut state = AppState::new(Arc::new(Catalog::builtin()));
        state.apply_hydration(&auth, HydrationSnapshot::default());
        let user = state.user().unwrap();
        assert_eq!(user.id, auth.id);
        assert_eq!(user.full_name, "Sam Rivera");
        assert!((user.height_cm - profile_defaults::HEIGHT_CM).abs() < f64::EPSILON);
        assert!((user.starting_weight_kg - user.current_weight_kg).abs() < f64::EPSILON);
    }

    #[test]
    fn test_log_weight_appends_in_call_order() {
        let (mut state, _) = signed_in();
        for weight in [70.0, 69.4, 68.9] {
            let ops = state.apply(Action::LogWeight(weight), now()).unwrap();
            assert!(matches!(ops[0], RemoteOp::InsertWeightLog(_)));
        }
        let user = state.user().unwrap();
        let weights: Vec<f64> = user.weight_history.iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![70.0, 69.4, 68.9]);
        assert!((user.current_weight_kg - 68.9).abs() < f64::EPSILON);
        assert!((user.starting_weight_kg - 70.0).abs() < f64::EPSILON);
        assert_eq!(user.weight_history[0].date, "Oct 19");
    }

    #[test]
    fn test_toggle_workout_is_one_way_remotely() {
        let (mut state, _) = signed_in();
        let ops = state
            .apply(Action::ToggleCompleteWorkout(1), now())
            .unwrap();
        assert!(ops
            .iter()
            .any(|op| matches!(op, RemoteOp::InsertWorkoutProgress(row) if row.workout_id == 1)));
        assert!(ops
            .iter()
            .any(|op| matches!(op, RemoteOp::InsertJournalEntry(_))));
        assert!(state.workout(1).unwrap().completed);
        assert_eq!(state.journal()[0].date, "Oct 19, 2026");
        assert!(state.journal()[0].content.starts_with("Completed Day 1: "));

        let ops = state
            .apply(Action::ToggleCompleteWorkout(1), now())
            .unwrap();
        assert!(ops.is_empty());
        assert!(!state.workout(1).unwrap().completed);
    }

    #[test]
    fn test_unknown_ids_are_rejected_without_mutation() {
        let (mut state, _) = signed_in();
        let err = state
            .apply(Action::ToggleCompleteWorkout(999), now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert!(state.overlay().completed_workouts.is_empty());
        assert!(state.select_workout(999).is_err());
    }

    #[test]
    fn test_water_total_keeps_quarter_liters() {
        let (mut state, _) = signed_in();
        state.apply(Action::LogWater(0.25), now()).unwrap();
        state.apply(Action::LogWater(0.5), now()).unwrap();
        assert!((state.water_today_liters() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_workout_awards_badges_once() {
        let (mut state, _) = signed_in();
        let ops = state
            .apply(Action::ToggleCompleteWorkout(1), now())
            .unwrap();
        let user = state.user().unwrap();
        assert!(user.earned_badges.contains(badge_ids::FIRST_STEP));
        assert!(user.earned_badges.contains(badge_ids::REFLECTIVE));
        assert!(has_badge_patch(&ops));
        assert_eq!(
            state.new_badge().map(|badge| badge.id.as_str()),
            Some(badge_ids::REFLECTIVE)
        );

        state.apply(Action::ClearNewBadge, now()).unwrap();
        assert!(state.new_badge().is_none());

        let ops = state.apply(Action::ToggleCompleteWorkout(1), now()).unwrap();
        assert!(ops.is_empty());
        assert!(state
            .user()
            .unwrap()
            .earned_badges
            .contains(badge_ids::FIRST_STEP));
    }

    #[test]
    fn test_failed_fetches_keep_prior_values_for_same_user() {
        let (mut state, auth) = signed_in();
        state.apply(Action::LogJournal("day one".to_owned()), now()).unwrap();
        state.apply(Action::LogWater(1.0), now()).unwrap();

        state.apply_hydration(
            &auth,
            HydrationSnapshot {
                water_today_liters: Some(1.5),
                ..HydrationSnapshot::default()
            },
        );
        assert_eq!(state.journal().len(), 1);
        assert!((state.water_today_liters() - 1.5).abs() < f64::EPSILON);

        state.apply_hydration(&auth_user(), HydrationSnapshot::default());
        assert!(state.journal().is_empty());
        assert!(state.water_today_liters().abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_session_keeps_theme() {
        let (mut state, _) = signed_in();
        state.apply(Action::ToggleTheme, now()).unwrap();
        state.enter_dashboard();
        state.clear_session();
        assert!(state.user().is_none());
        assert_eq!(state.screen(), Screen::Auth);
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_progress_photo_overwrites_one_slot() {
        let (mut state, _) = signed_in();
        let ops = state
            .apply(
                Action::UpdateProgressPhoto {
                    kind: PhotoKind::Current,
                    url: "photos/current.jpg".to_owned(),
                },
                now(),
            )
            .unwrap();
        let user = state.user().unwrap();
        assert_eq!(user.current_photo_url.as_deref(), Some("photos/current.jpg"));
        assert!(user.start_photo_url.is_none());
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn test_unloaded_profile_keeps_badge_awards_local() {
        let auth = auth_user();
        let mut state = AppState::new(Arc::new(Catalog::builtin()));
        state.apply_hydration(&auth, HydrationSnapshot::default());

        let ops = state
            .apply(Action::LogJournal("hello".to_owned()), now())
            .unwrap();
        assert!(state
            .user()
            .unwrap()
            .earned_badges
            .contains(badge_ids::REFLECTIVE));
        assert!(!has_badge_patch(&ops));
        assert_eq!(ops.len(), 1);

        // a later successful fetch of the same user enables persistence
        let ops = state.apply_hydration(
            &auth,
            HydrationSnapshot {
                profile: Some(profile_row(&auth)),
                ..HydrationSnapshot::default()
            },
        );
        assert!(has_badge_patch(&ops));
        let ops = state.apply(Action::LogWeight(70.0), now()).unwrap();
        assert!(has_badge_patch(&ops));
    }

    #[test]
    fn test_prior_profile_keeps_loaded_flag_when_refetch_fails() {
        let (mut state, auth) = signed_in();
        state.apply_hydration(&auth, HydrationSnapshot::default());

        let ops = state.apply(Action::LogWater(2.0), now()).unwrap();
        assert!(has_badge_patch(&ops));
    }

    #[test]
    fn test_hydration_awards_badges_earned_elsewhere() {
        let auth = auth_user();
        let mut state = AppState::new(Arc::new(Catalog::builtin()));
        let mut row = profile_row(&auth);
        row.earned_badges = Some(vec![badge_ids::FIRST_STEP.to_owned()]);

        let ops = state.apply_hydration(
            &auth,
            HydrationSnapshot {
                profile: Some(row),
                completed_workouts: Some((1..=7).collect()),
                ..HydrationSnapshot::default()
            },
        );

        assert!(has_badge_patch(&ops));
        assert_eq!(
            state.new_badge().map(|badge| badge.id.as_str()),
            Some(badge_ids::WEEK_ONE)
        );
        let earned = &state.user().unwrap().earned_badges;
        assert!(earned.contains(badge_ids::FIRST_STEP));
        assert!(earned.contains(badge_ids::WEEK_ONE));
    }
}

// ABOUTME: Application store: single source of truth for session state, user data and catalogs
// ABOUTME: Applies optimistic actions locally and dispatches their remote writes in the background
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Application Store
//!
//! [`Store`] is the outer shell around [`AppState`]. It owns the collaborator
//! handle, runs the async session flows (see [`session`]) and forwards each user
//! action to [`AppState::apply`], dispatching the returned [`RemoteOp`]s through
//! a [`SyncDispatcher`]. Action methods are synchronous: the local change is
//! visible as soon as they return, while the remote writes settle later.
//!
//! ```rust,no_run
//! use fit28::backend::memory::MemoryBackend;
//! use fit28::catalog::Catalog;
//! use fit28::errors::AppResult;
//! use fit28::store::Store;
//! use std::sync::Arc;
//!
//! # async fn demo() -> AppResult<()> {
//! let mut store = Store::new(Arc::new(MemoryBackend::new()), Arc::new(Catalog::builtin()))?;
//! store.login("sam@example.com", "correct horse").await?;
//! store.log_water(0.25)?;
//! store.flush().await;
//! # Ok(())
//! # }
//! ```

/// Badge unlock rules
pub mod badges;
/// Remote write commands
pub mod commands;
/// Values computed on read
pub mod derived;
/// Screen state machine
pub mod navigation;
/// Session lifecycle flows
pub mod session;
/// Session-scoped state and transitions
pub mod state;
/// Background dispatch of remote writes
pub mod sync;

pub use commands::RemoteOp;
pub use derived::{Bmi, BmiCategory, TransformationSummary, WeeklyReport, WorkoutAccess};
pub use navigation::Screen;
pub use session::RegisterOutcome;
pub use state::{Action, AppState, HydrationSnapshot, SessionOverlay, Theme};
pub use sync::{SyncDispatcher, SyncEvent, SyncFailure, SyncOutcome};

use crate::backend::RemoteBackend;
use crate::catalog::Catalog;
use crate::config::environment::DEFAULT_PASSWORD_RESET_REDIRECT;
use crate::errors::AppResult;
use chrono::Local;
use fit28_core::models::PhotoKind;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Application store
pub struct Store {
    backend: Arc<dyn RemoteBackend>,
    state: AppState,
    sync: SyncDispatcher,
    password_reset_redirect: String,
    bootstrapped: bool,
}

impl Store {
    /// Signed-out store backed by `backend`
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when called outside a Tokio runtime
    pub fn new(backend: Arc<dyn RemoteBackend>, catalog: Arc<Catalog>) -> AppResult<Self> {
        let sync = SyncDispatcher::for_current_runtime(Arc::clone(&backend))?;
        Ok(Self {
            backend,
            state: AppState::new(catalog),
            sync,
            password_reset_redirect: DEFAULT_PASSWORD_RESET_REDIRECT.to_owned(),
            bootstrapped: false,
        })
    }

    /// Override the link target of password recovery emails
    #[must_use]
    pub fn with_password_reset_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.password_reset_redirect = redirect.into();
        self
    }

    /// Everything the presentation layer reads
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Name of the collaborator implementation
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn act(&mut self, action: Action) -> AppResult<()> {
        let ops = self.state.apply(action, Local::now())?;
        self.sync.dispatch(ops);
        Ok(())
    }

    /// Point the workout details screen at `id`
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` for an unknown workout
    pub fn select_workout(&mut self, id: u32) -> AppResult<()> {
        self.state.select_workout(id)
    }

    /// Move to another screen
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out, `InvalidState` for workout details
    /// without a selection
    pub fn navigate(&mut self, screen: Screen) -> AppResult<()> {
        self.state.navigate(screen)
    }

    /// Flip a workout's completion; completing it is recorded remotely once
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out, `ResourceNotFound` for an unknown workout
    pub fn toggle_complete_workout(&mut self, id: u32) -> AppResult<()> {
        self.act(Action::ToggleCompleteWorkout(id))
    }

    /// Flip a mindset lesson's completion
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out, `ResourceNotFound` for an unknown lesson
    pub fn toggle_complete_mindset(&mut self, id: u32) -> AppResult<()> {
        self.act(Action::ToggleCompleteMindset(id))
    }

    /// Record a body weight in kg
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out
    pub fn log_weight(&mut self, weight_kg: f64) -> AppResult<()> {
        self.act(Action::LogWeight(weight_kg))
    }

    /// Add liters to today's water total
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out
    pub fn log_water(&mut self, liters: f64) -> AppResult<()> {
        self.act(Action::LogWater(liters))
    }

    /// Write a journal entry
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out
    pub fn log_journal(&mut self, text: impl Into<String>) -> AppResult<()> {
        self.act(Action::LogJournal(text.into()))
    }

    /// Overwrite height, target weight and current weight
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out
    pub fn update_profile_stats(
        &mut self,
        height_cm: f64,
        target_weight_kg: f64,
        current_weight_kg: f64,
    ) -> AppResult<()> {
        self.act(Action::UpdateProfileStats {
            height_cm,
            target_weight_kg,
            current_weight_kg,
        })
    }

    /// Replace a progress photo reference
    ///
    /// # Errors
    ///
    /// `AuthRequired` while signed out
    pub fn update_progress_photo(&mut self, kind: PhotoKind, url: impl Into<String>) -> AppResult<()> {
        self.act(Action::UpdateProgressPhoto {
            kind,
            url: url.into(),
        })
    }

    /// Flip the UI theme
    pub fn toggle_theme(&mut self) {
        self.state.apply(Action::ToggleTheme, Local::now()).ok();
    }

    /// Dismiss the newly unlocked badge notice
    pub fn clear_new_badge(&mut self) {
        self.state.apply(Action::ClearNewBadge, Local::now()).ok();
    }

    /// Wait for every dispatched remote write to settle
    pub async fn flush(&mut self) {
        self.sync.flush().await;
    }

    /// Remote writes not yet reaped
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.sync.pending()
    }

    /// Subscribe to settle events of remote writes
    #[must_use]
    pub fn subscribe_sync(&self) -> broadcast::Receiver<SyncEvent> {
        self.sync.subscribe()
    }

    /// Most recent remote write failures, oldest first
    #[must_use]
    pub fn sync_failures(&self) -> Vec<SyncFailure> {
        self.sync.failures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;

    #[tokio::test]
    async fn test_new_store_is_signed_out_on_auth() {
        let store = Store::new(Arc::new(MemoryBackend::new()), Arc::new(Catalog::builtin())).unwrap();
        assert!(store.state().user().is_none());
        assert_eq!(store.state().screen(), Screen::Auth);
        assert_eq!(store.backend_name(), "memory");
        assert_eq!(store.pending_writes(), 0);
    }

    #[test]
    fn test_store_requires_runtime() {
        let result = Store::new(Arc::new(MemoryBackend::new()), Arc::new(Catalog::builtin()));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_theme_toggle_works_signed_out() {
        let mut store = Store::new(Arc::new(MemoryBackend::new()), Arc::new(Catalog::builtin())).unwrap();
        store.toggle_theme();
        assert_eq!(store.state().theme(), Theme::Dark);
        store.toggle_theme();
        assert_eq!(store.state().theme(), Theme::Light);
    }
}

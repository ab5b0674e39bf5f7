// ABOUTME: Session lifecycle of the store: bootstrap, hydration, login, registration, reset, logout
// ABOUTME: Authentication failures propagate; hydration fetch failures degrade per collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::state::HydrationSnapshot;
use super::Store;
use crate::backend::{
    insert_row, select_rows, AuthUser, Direction, Query, RemoteBackend, UserMetadata,
};
use crate::errors::AppResult;
use crate::logging::AppLogger;
use chrono::{DateTime, Local, NaiveTime, SecondsFormat, Utc};
use fit28_core::constants::{date_formats, tables};
use fit28_core::models::{
    JournalEntry, JournalRow, MindsetProgressRow, ProfileRow, WaterLogRow, WeightLogRow,
    WeightSample, WorkoutProgressRow,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// How a registration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A session was issued and the user is on the dashboard
    SignedIn,
    /// The collaborator wants the email confirmed first; navigation is unchanged
    VerificationRequired,
}

impl Store {
    /// Recover a persisted session at process start
    ///
    /// Returns whether a user is signed in afterwards. Failures are logged and
    /// leave the store on the `Auth` screen. Only the first call does any work.
    pub async fn bootstrap(&mut self) -> bool {
        if self.bootstrapped {
            return self.state.is_authenticated();
        }
        self.bootstrapped = true;

        match self.backend.get_session().await {
            Ok(Some(session)) => {
                info!(user_id = %session.user.id, "Recovered session");
                self.hydrate(&session.user).await;
                self.state.enter_dashboard();
                true
            }
            Ok(None) => {
                debug!("No session to recover");
                false
            }
            Err(e) => {
                warn!("Session recovery failed, continuing signed out: {e}");
                false
            }
        }
    }

    /// Populate the state for `user` from the collaborator
    ///
    /// A missing profile row is created with defaults. Collections whose fetch
    /// fails keep their prior value. Badges the hydrated progress already
    /// qualifies for are awarded here.
    pub async fn hydrate(&mut self, user: &AuthUser) {
        let snapshot = fetch_snapshot(self.backend.as_ref(), user, Local::now()).await;
        let ops = self.state.apply_hydration(user, snapshot);
        self.sync.dispatch(ops);
        debug!(user_id = %user.id, "Hydrated session");
    }

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Authentication and connectivity errors from the collaborator, unchanged;
    /// state is untouched on error
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<()> {
        let session = match self.backend.sign_in_with_password(email, password).await {
            Ok(session) => session,
            Err(e) => {
                AppLogger::log_auth_event(None, "login", false, Some(&e.to_string()));
                return Err(e);
            }
        };

        self.hydrate(&session.user).await;
        self.state.enter_dashboard();
        AppLogger::log_auth_event(Some(&session.user.id.to_string()), "login", true, None);
        Ok(())
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// Authentication and connectivity errors from the collaborator, unchanged
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: Option<&str>,
    ) -> AppResult<RegisterOutcome> {
        let metadata = UserMetadata {
            full_name: Some(full_name.to_owned()),
            phone: phone.map(str::to_owned),
        };
        let result = match self.backend.sign_up(email, password, metadata).await {
            Ok(result) => result,
            Err(e) => {
                AppLogger::log_auth_event(None, "register", false, Some(&e.to_string()));
                return Err(e);
            }
        };
        let user_id = result.user.id.to_string();

        if let Some(session) = result.session {
            self.hydrate(&session.user).await;
            self.state.enter_dashboard();
            AppLogger::log_auth_event(Some(&user_id), "register", true, None);
            return Ok(RegisterOutcome::SignedIn);
        }

        let row = default_profile_row(&result.user);
        if let Err(e) = insert_row(self.backend.as_ref(), tables::PROFILES, &row).await {
            debug!("Profile pre-creation before verification skipped: {e}");
        }
        AppLogger::log_auth_event(
            Some(&user_id),
            "register",
            true,
            Some("email verification required"),
        );
        Ok(RegisterOutcome::VerificationRequired)
    }

    /// Ask the collaborator to send a password recovery link
    pub async fn reset_password(&self, email: &str) -> bool {
        match self
            .backend
            .reset_password_for_email(email, &self.password_reset_redirect)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Password reset request failed: {e}");
                false
            }
        }
    }

    /// Sign out and drop every session-scoped value
    ///
    /// Collaborator failures are logged and ignored.
    pub async fn logout(&mut self) {
        let user_id = self.state.user().map(|user| user.id.to_string());
        if let Err(e) = self.backend.sign_out().await {
            warn!("Remote sign-out failed, clearing local session anyway: {e}");
        }
        self.state.clear_session();
        AppLogger::log_auth_event(user_id.as_deref(), "logout", true, None);
    }
}

fn default_profile_row(user: &AuthUser) -> ProfileRow {
    ProfileRow::with_defaults(
        user.id,
        Some(user.email.clone()),
        user.metadata.full_name.clone(),
        user.metadata.phone.clone(),
    )
}

/// Keep a fetched value, or log the failure and fall back to the prior value
fn settle<T>(collection: &str, result: AppResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(collection, "Hydration fetch failed, keeping prior value: {e}");
            None
        }
    }
}

fn local_midnight(now: DateTime<Local>) -> DateTime<Utc> {
    now.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map_or_else(|| now.with_timezone(&Utc), |midnight| midnight.with_timezone(&Utc))
}

fn date_label(created_at: Option<DateTime<Utc>>, format: &str) -> String {
    created_at.map_or_else(String::new, |at| {
        at.with_timezone(&Local).format(format).to_string()
    })
}

fn owned_by(user: &AuthUser) -> Query {
    Query::new().eq("user_id", user.id.to_string())
}

/// Fetch every collection of `user` concurrently
pub(crate) async fn fetch_snapshot(
    backend: &dyn RemoteBackend,
    user: &AuthUser,
    now: DateTime<Local>,
) -> HydrationSnapshot {
    let (
        profile,
        weight_history,
        water_today_liters,
        journal,
        completed_workouts,
        completed_mindset,
    ) = tokio::join!(
        fetch_profile(backend, user),
        fetch_weight_history(backend, user),
        fetch_water_since(backend, user, local_midnight(now)),
        fetch_journal(backend, user),
        fetch_completed_workouts(backend, user),
        fetch_completed_mindset(backend, user),
    );

    HydrationSnapshot {
        profile,
        weight_history: settle(tables::WEIGHT_LOGS, weight_history),
        water_today_liters: settle(tables::WATER_LOGS, water_today_liters),
        journal: settle(tables::JOURNAL_ENTRIES, journal),
        completed_workouts: settle(tables::USER_WORKOUT_PROGRESS, completed_workouts),
        completed_mindset: settle(tables::USER_MINDSET_PROGRESS, completed_mindset),
    }
}

/// Profile row of `user`, created with defaults when absent
async fn fetch_profile(backend: &dyn RemoteBackend, user: &AuthUser) -> Option<ProfileRow> {
    let query = Query::new().eq("id", user.id.to_string());
    let rows = settle(
        tables::PROFILES,
        select_rows::<ProfileRow>(backend, tables::PROFILES, &query).await,
    )?;
    if let Some(row) = rows.into_iter().next() {
        return Some(row);
    }

    info!(user_id = %user.id, "No profile row, creating one with defaults");
    let row = default_profile_row(user);
    if let Err(e) = insert_row(backend, tables::PROFILES, &row).await {
        warn!(user_id = %user.id, "Default profile insert failed: {e}");
    }
    Some(row)
}

async fn fetch_weight_history(
    backend: &dyn RemoteBackend,
    user: &AuthUser,
) -> AppResult<Vec<WeightSample>> {
    let query = owned_by(user).order_by("created_at", Direction::Ascending);
    let rows: Vec<WeightLogRow> = select_rows(backend, tables::WEIGHT_LOGS, &query).await?;
    Ok(rows
        .into_iter()
        .map(|row| WeightSample {
            date: date_label(row.created_at, date_formats::WEIGHT_SAMPLE),
            weight: row.weight,
        })
        .collect())
}

async fn fetch_water_since(
    backend: &dyn RemoteBackend,
    user: &AuthUser,
    since: DateTime<Utc>,
) -> AppResult<f64> {
    let query = owned_by(user).gte(
        "created_at",
        since.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    let rows: Vec<WaterLogRow> = select_rows(backend, tables::WATER_LOGS, &query).await?;
    Ok(rows.iter().map(|row| row.amount).sum())
}

async fn fetch_journal(
    backend: &dyn RemoteBackend,
    user: &AuthUser,
) -> AppResult<Vec<JournalEntry>> {
    let query = owned_by(user).order_by("created_at", Direction::Descending);
    let rows: Vec<JournalRow> = select_rows(backend, tables::JOURNAL_ENTRIES, &query).await?;
    Ok(rows
        .into_iter()
        .map(|row| JournalEntry {
            id: row.id,
            date: date_label(row.created_at, date_formats::JOURNAL_ENTRY),
            content: row.content,
        })
        .collect())
}

async fn fetch_completed_workouts(
    backend: &dyn RemoteBackend,
    user: &AuthUser,
) -> AppResult<BTreeSet<u32>> {
    let rows: Vec<WorkoutProgressRow> =
        select_rows(backend, tables::USER_WORKOUT_PROGRESS, &owned_by(user)).await?;
    Ok(rows.into_iter().map(|row| row.workout_id).collect())
}

async fn fetch_completed_mindset(
    backend: &dyn RemoteBackend,
    user: &AuthUser,
) -> AppResult<BTreeSet<u32>> {
    let rows: Vec<MindsetProgressRow> =
        select_rows(backend, tables::USER_MINDSET_PROGRESS, &owned_by(user)).await?;
    Ok(rows.into_iter().map(|row| row.mindset_id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_local_midnight_is_start_of_local_day() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 15, 45, 10).unwrap();
        let midnight = local_midnight(now).with_timezone(&Local);
        assert_eq!(midnight.date_naive(), now.date_naive());
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
    }

    #[test]
    fn test_date_label_without_timestamp_is_empty() {
        assert_eq!(date_label(None, date_formats::WEIGHT_SAMPLE), "");
    }
}

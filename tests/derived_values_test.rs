// ABOUTME: Integration tests for values derived from hydrated store state
// ABOUTME: Tests BMI, program progress, next workout and badge, access gating and reports
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use common::{backend_with_account, seed_owned, seed_profile, store_over, PASSWORD};
use fit28::backend::memory::MemoryBackend;
use fit28::backend::AuthUser;
use fit28::constants::{badge_ids, tables};
use fit28::store::{BmiCategory, Store, WorkoutAccess};
use serde_json::{json, Value};
use std::sync::Arc;

/// Signed-in store whose user has completed workouts `1..=completed`
async fn store_with_progress(
    completed: u32,
    profile: Value,
) -> Result<(Store, Arc<MemoryBackend>, AuthUser)> {
    let (backend, user) = backend_with_account("progress@example.com").await;
    seed_profile(&backend, &user, profile).await;
    for workout_id in 1..=completed {
        seed_owned(
            &backend,
            tables::USER_WORKOUT_PROGRESS,
            &user,
            json!({ "workout_id": workout_id }),
            Utc::now(),
        )
        .await;
    }
    let mut store = store_over(&backend)?;
    store.login(&user.email, PASSWORD).await?;
    Ok((store, backend, user))
}

#[tokio::test]
async fn test_bmi_from_profile() -> Result<()> {
    let (store, _, _) =
        store_with_progress(0, json!({ "current_weight": 68.0, "height": 160.0 })).await?;

    let bmi = store.state().bmi().expect("bmi");
    assert!((bmi.value - 26.6).abs() < f64::EPSILON);
    assert_eq!(bmi.category, BmiCategory::Overweight);
    assert_eq!(bmi.category.to_string(), "Overweight");

    Ok(())
}

#[tokio::test]
async fn test_program_progress_percent() -> Result<()> {
    let (store, _, _) = store_with_progress(0, json!({})).await?;
    assert_eq!(store.state().program_progress_percent(), 0);

    let (store, _, _) = store_with_progress(7, json!({})).await?;
    assert_eq!(store.state().program_progress_percent(), 25);
    assert_eq!(store.state().completed_workout_count(), 7);

    let (store, _, _) = store_with_progress(28, json!({})).await?;
    assert_eq!(store.state().program_progress_percent(), 100);
    assert!(store.state().next_workout().is_none());

    Ok(())
}

#[tokio::test]
async fn test_next_workout_is_first_incomplete_day() -> Result<()> {
    let (mut store, _, _) = store_with_progress(7, json!({})).await?;
    assert_eq!(store.state().next_workout().map(|w| w.day_number), Some(8));

    store.toggle_complete_workout(3)?;
    assert_eq!(store.state().next_workout().map(|w| w.day_number), Some(3));

    Ok(())
}

#[tokio::test]
async fn test_next_badge_skips_earned_badges() -> Result<()> {
    let (store, _, _) = store_with_progress(
        0,
        json!({ "earned_badges": [badge_ids::FIRST_STEP] }),
    )
    .await?;

    assert_eq!(
        store.state().next_badge().map(|badge| badge.id.as_str()),
        Some(badge_ids::FIRST_WEIGH_IN)
    );
    assert_eq!(store.state().earned_badges().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_locked_workouts_need_premium() -> Result<()> {
    let (store, _, _) = store_with_progress(0, json!({})).await?;
    assert_eq!(store.state().workout_access(3), WorkoutAccess::Open);
    assert_eq!(store.state().workout_access(10), WorkoutAccess::Upsell);
    assert_eq!(store.state().workout_access(99), WorkoutAccess::NotFound);

    let (store, _, _) = store_with_progress(0, json!({ "is_premium": true })).await?;
    assert_eq!(store.state().workout_access(10), WorkoutAccess::Open);

    Ok(())
}

#[tokio::test]
async fn test_weekly_report_summarizes_session() -> Result<()> {
    let (mut store, _, _) = store_with_progress(7, json!({})).await?;
    store.log_weight(70.0)?;
    store.log_weight(69.5)?;
    store.log_water(1.5)?;
    store.log_journal("Week one done")?;

    let report = store.state().weekly_report().expect("report");
    assert_eq!(report.workouts_completed, 7);
    assert_eq!(report.program_percent, 25);
    assert_eq!(report.weight_change_kg, Some(-0.5));
    assert!((report.water_today_liters - 1.5).abs() < f64::EPSILON);
    assert_eq!(report.journal_entries, 1);
    assert!(report.badges_earned >= 2);

    Ok(())
}

#[tokio::test]
async fn test_transformation_compares_first_and_current_weight() -> Result<()> {
    let (backend, user) = backend_with_account("before-after@example.com").await;
    seed_profile(
        &backend,
        &user,
        json!({
            "current_weight": 65.0,
            "target_weight": 60.0,
            "start_photo_url": "photos/start.jpg"
        }),
    )
    .await;
    let now = Utc::now();
    for (days_ago, weight) in [(14, 70.0), (1, 65.0)] {
        seed_owned(
            &backend,
            tables::WEIGHT_LOGS,
            &user,
            json!({ "weight": weight }),
            now - Duration::days(days_ago),
        )
        .await;
    }
    let mut store = store_over(&backend)?;
    store.login(&user.email, PASSWORD).await?;

    let summary = store.state().transformation().expect("summary");
    assert!((summary.starting_weight_kg - 70.0).abs() < f64::EPSILON);
    assert!((summary.change_kg + 5.0).abs() < f64::EPSILON);
    assert!((summary.remaining_kg - 5.0).abs() < f64::EPSILON);
    assert_eq!(summary.progress_percent, 50);
    assert_eq!(summary.start_photo_url.as_deref(), Some("photos/start.jpg"));
    assert!(summary.current_photo_url.is_none());

    Ok(())
}

#[tokio::test]
async fn test_signed_out_has_no_derived_values() -> Result<()> {
    let (backend, _) = backend_with_account("ana@example.com").await;
    let store = store_over(&backend)?;

    assert!(store.state().bmi().is_none());
    assert!(store.state().weekly_report().is_none());
    assert!(store.state().transformation().is_none());
    assert_eq!(store.state().program_progress_percent(), 0);
    assert_eq!(store.state().workout_access(10), WorkoutAccess::Upsell);

    Ok(())
}

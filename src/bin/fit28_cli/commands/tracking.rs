// ABOUTME: Progress tracking commands for fit28-cli
// ABOUTME: Dashboard status, reports and the optimistic logging actions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28::errors::{AppError, AppResult};
use fit28::models::PhotoKind;
use fit28::store::{Store, WorkoutAccess};

use crate::helpers::display::{display_new_badge, display_report, display_status};

type Result<T> = AppResult<T>;

fn require_user(store: &Store) -> Result<()> {
    if store.state().is_authenticated() {
        Ok(())
    } else {
        Err(AppError::auth_required().with_resource("run `fit28-cli login` first"))
    }
}

/// Dashboard summary
pub fn status(store: &Store) -> Result<()> {
    require_user(store)?;
    display_status(store.state());
    Ok(())
}

/// Weekly report and transformation summary
pub fn report(store: &Store) -> Result<()> {
    require_user(store)?;
    display_report(store.state());
    Ok(())
}

/// Record a weight sample
pub fn log_weight(store: &mut Store, kg: f64) -> Result<()> {
    store.log_weight(kg)?;
    println!("Logged {kg:.1} kg");
    display_new_badge(store.state());
    Ok(())
}

/// Add to today's water total
pub fn log_water(store: &mut Store, liters: f64) -> Result<()> {
    store.log_water(liters)?;
    println!(
        "Water today: {:.1} L",
        store.state().water_today_liters()
    );
    display_new_badge(store.state());
    Ok(())
}

/// Write a journal entry
pub fn journal(store: &mut Store, text: String) -> Result<()> {
    store.log_journal(text)?;
    println!("Journal entry saved ({} total)", store.state().journal().len());
    display_new_badge(store.state());
    Ok(())
}

/// Complete a workout unless it is already completed or needs premium
pub fn complete_workout(store: &mut Store, id: u32) -> Result<()> {
    require_user(store)?;
    match store.state().workout_access(id) {
        WorkoutAccess::NotFound => return Err(AppError::not_found(format!("workout {id}"))),
        WorkoutAccess::Upsell => {
            println!("Day {id} is part of the premium program. Upgrade to unlock it.");
            return Ok(());
        }
        WorkoutAccess::Open => {}
    }
    if store.state().workout(id).is_some_and(|workout| workout.completed) {
        println!("Workout {id} is already completed.");
        return Ok(());
    }

    store.select_workout(id)?;
    store.toggle_complete_workout(id)?;
    println!(
        "Completed! Program progress: {}%",
        store.state().program_progress_percent()
    );
    display_new_badge(store.state());
    Ok(())
}

/// Complete a mindset lesson unless it is already completed
pub fn complete_mindset(store: &mut Store, id: u32) -> Result<()> {
    require_user(store)?;
    let already = store
        .state()
        .mindset_items()
        .iter()
        .any(|item| item.id == id && item.completed);
    if already {
        println!("Lesson {id} is already completed.");
        return Ok(());
    }
    store.toggle_complete_mindset(id)?;
    println!("Lesson {id} completed.");
    display_new_badge(store.state());
    Ok(())
}

/// Overwrite body stats
pub fn set_stats(store: &mut Store, height: f64, target: f64, current: f64) -> Result<()> {
    store.update_profile_stats(height, target, current)?;
    match store.state().bmi() {
        Some(bmi) => println!("Stats saved. BMI {:.1} ({})", bmi.value, bmi.category),
        None => println!("Stats saved."),
    }
    Ok(())
}

/// Set a progress photo
pub fn photo(store: &mut Store, kind: PhotoKind, url: String) -> Result<()> {
    store.update_progress_photo(kind, url)?;
    println!("Photo saved.");
    Ok(())
}

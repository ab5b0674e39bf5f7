// ABOUTME: Output formatting helpers for fit28-cli
// ABOUTME: Provides consistent display functions for the dashboard, reports and sync failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28::store::{AppState, SyncFailure};

/// Dashboard summary
pub fn display_status(state: &AppState) {
    let Some(user) = state.user() else {
        return;
    };
    println!("\n{}", "=".repeat(60));
    println!("{} <{}>", user.full_name, user.email);
    println!("{}", "=".repeat(60));

    match state.bmi() {
        Some(bmi) => println!("BMI:            {:.1} ({})", bmi.value, bmi.category),
        None => println!("BMI:            n/a"),
    }
    println!(
        "Weight:         {:.1} kg (target {:.1} kg)",
        user.current_weight_kg, user.target_weight_kg
    );
    println!(
        "Program:        {}% ({} of {} workouts)",
        state.program_progress_percent(),
        state.completed_workout_count(),
        state.catalog().workouts().len()
    );
    match state.next_workout() {
        Some(workout) => println!("Next workout:   Day {} - {}", workout.day_number, workout.title),
        None => println!("Next workout:   program finished!"),
    }
    match state.next_badge() {
        Some(badge) => println!("Next badge:     {} - {}", badge.title, badge.description),
        None => println!("Next badge:     all badges earned"),
    }
    println!("Water today:    {:.1} L", state.water_today_liters());
    println!("Journal:        {} entries", state.journal().len());
}

/// Weekly report and transformation summary
pub fn display_report(state: &AppState) {
    if let Some(report) = state.weekly_report() {
        println!("\nWEEKLY REPORT");
        println!("{}", "=".repeat(60));
        println!("Workouts completed: {}", report.workouts_completed);
        println!("Program progress:   {}%", report.program_percent);
        match report.weight_change_kg {
            Some(change) => println!("Weight change:      {change:+.1} kg"),
            None => println!("Weight change:      no samples yet"),
        }
        println!("Water today:        {:.1} L", report.water_today_liters);
        println!("Journal entries:    {}", report.journal_entries);
        println!("Badges earned:      {}", report.badges_earned);
    }

    if let Some(summary) = state.transformation() {
        println!("\nTRANSFORMATION");
        println!("{}", "=".repeat(60));
        println!(
            "Start {:.1} kg -> now {:.1} kg ({:+.1} kg)",
            summary.starting_weight_kg, summary.current_weight_kg, summary.change_kg
        );
        println!(
            "Target {:.1} kg, {:.1} kg to go ({}% there)",
            summary.target_weight_kg, summary.remaining_kg, summary.progress_percent
        );
        if let (Some(start), Some(current)) = (&summary.start_photo_url, &summary.current_photo_url)
        {
            println!("Photos: {start} -> {current}");
        }
    }
}

/// Announce a newly unlocked badge
pub fn display_new_badge(state: &AppState) {
    if let Some(badge) = state.new_badge() {
        println!("Badge unlocked: {} - {}", badge.title, badge.description);
    }
}

/// Tell the user which writes did not reach the server
pub fn report_sync_failures(failures: &[SyncFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!(
        "WARNING {} change(s) were saved locally but not synced:",
        failures.len()
    );
    for failure in failures {
        eprintln!(
            "  - {} on {}: {}",
            failure.operation, failure.table, failure.message
        );
    }
}

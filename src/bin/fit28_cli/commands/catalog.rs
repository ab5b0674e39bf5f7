// ABOUTME: Catalog browsing commands for fit28-cli
// ABOUTME: Lists the program with per-user completion and the recipe library
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28::errors::{AppError, AppResult};
use fit28::models::{Recipe, RecipeCategory};
use fit28::store::{Store, WorkoutAccess};

type Result<T> = AppResult<T>;

/// Print the 28-day program
pub fn program(store: &Store) -> Result<()> {
    let state = store.state();
    for workout in state.workouts() {
        let marker = if workout.completed {
            "[x]"
        } else if state.workout_access(workout.id) == WorkoutAccess::Upsell {
            "[$]"
        } else {
            "[ ]"
        };
        println!(
            "{marker} Day {:>2}  {:<24} {:>2} min  {}",
            workout.day_number,
            workout.title,
            workout.duration_minutes,
            workout.difficulty.label()
        );
    }
    Ok(())
}

/// Print recipes, optionally of one category
pub fn recipes(store: &Store, category: Option<&str>) -> Result<()> {
    let catalog = store.state().catalog();
    let filter = category
        .map(|raw| {
            RecipeCategory::parse(raw)
                .ok_or_else(|| AppError::invalid_input(format!("unknown recipe category '{raw}'")))
        })
        .transpose()?;

    let recipes: Vec<&Recipe> = match filter {
        Some(category) => catalog.recipes_in(category).collect(),
        None => catalog.recipes().iter().collect(),
    };

    for recipe in recipes {
        println!(
            "{:>2}. {:<28} {:>4} kcal  {:>3} min  {}",
            recipe.id,
            recipe.title,
            recipe.calories,
            recipe.time_minutes,
            recipe.tags.join(", ")
        );
    }
    Ok(())
}

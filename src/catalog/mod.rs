// ABOUTME: Process-wide immutable catalogs of workouts, recipes, badges and mindset lessons
// ABOUTME: Built once at startup, independent of any user session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Reference Catalogs
//!
//! Catalog entries never carry per-user state: the `completed` flags of
//! [`Workout`] and [`MindsetItem`] are always `false` here and are merged in from
//! the session overlay when the store reads them.

mod badges;
mod mindset;
mod program;
mod recipes;

use fit28_core::models::{Badge, MindsetItem, Recipe, RecipeCategory, Workout};

/// All reference data of the application
#[derive(Debug, Clone)]
pub struct Catalog {
    workouts: Vec<Workout>,
    recipes: Vec<Recipe>,
    badges: Vec<Badge>,
    mindset: Vec<MindsetItem>,
}

impl Catalog {
    /// The built-in 28-day program and its companion content
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            program::workouts(),
            recipes::recipes(),
            badges::badges(),
            mindset::lessons(),
        )
    }

    /// Catalog from explicit data; workouts are kept in day order
    #[must_use]
    pub fn new(
        mut workouts: Vec<Workout>,
        recipes: Vec<Recipe>,
        badges: Vec<Badge>,
        mindset: Vec<MindsetItem>,
    ) -> Self {
        workouts.sort_by_key(|workout| workout.day_number);
        Self {
            workouts,
            recipes,
            badges,
            mindset,
        }
    }

    /// Program workouts in `day_number` order
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    /// Workout by id
    #[must_use]
    pub fn workout(&self, id: u32) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    /// Recipe library
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Recipes of one meal category
    pub fn recipes_in(&self, category: RecipeCategory) -> impl Iterator<Item = &Recipe> {
        self.recipes
            .iter()
            .filter(move |recipe| recipe.category == category)
    }

    /// Badge catalog, in unlock order
    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    /// Badge by id
    #[must_use]
    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|badge| badge.id == id)
    }

    /// Mindset lessons
    #[must_use]
    pub fn mindset(&self) -> &[MindsetItem] {
        &self.mindset
    }

    /// Mindset lesson by id
    #[must_use]
    pub fn mindset_item(&self, id: u32) -> Option<&MindsetItem> {
        self.mindset.iter().find(|item| item.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fit28_core::constants::{badge_ids, program::PROGRAM_DAYS};
    use std::collections::HashSet;

    #[test]
    fn test_program_days_are_contiguous_and_unique() {
        let catalog = Catalog::builtin();
        let days: Vec<u32> = catalog.workouts().iter().map(|w| w.day_number).collect();
        let expected: Vec<u32> = (1..=PROGRAM_DAYS).collect();
        assert_eq!(days, expected);

        let ids: HashSet<u32> = catalog.workouts().iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), catalog.workouts().len());
    }

    #[test]
    fn test_catalog_carries_no_user_state() {
        let catalog = Catalog::builtin();
        assert!(catalog.workouts().iter().all(|w| !w.completed));
        assert!(catalog.mindset().iter().all(|m| !m.completed));
    }

    #[test]
    fn test_first_week_is_free() {
        let catalog = Catalog::builtin();
        assert!(!catalog.workouts()[0].is_locked);
        assert!(!catalog.workouts()[6].is_locked);
        assert!(catalog.workouts()[7].is_locked);
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::builtin();
        assert!(catalog.badge(badge_ids::FIRST_STEP).is_some());
        assert!(catalog.badge("unknown").is_none());
        assert_eq!(catalog.workout(3).map(|w| w.day_number), Some(3));
        assert!(catalog.recipes_in(RecipeCategory::Breakfast).count() > 0);
        assert!(catalog.mindset_item(1).is_some());
    }
}

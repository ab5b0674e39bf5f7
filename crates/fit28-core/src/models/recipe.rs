// ABOUTME: Recipe library model with nutrition, ingredients and steps
// ABOUTME: Read-only reference data, never mutated by a user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Meal category of a recipe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Dinner
    Dinner,
    /// Snack between meals
    Snack,
}

impl RecipeCategory {
    /// Parse a category name, ignoring case
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snack" | "snacks" => Some(Self::Snack),
            _ => None,
        }
    }
}

/// A recipe of the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Catalog id
    pub id: u32,
    /// Title
    pub title: String,
    /// Calories per serving
    pub calories: u32,
    /// Preparation time
    pub time_minutes: u32,
    /// Meal category
    pub category: RecipeCategory,
    /// Image reference
    pub image_url: String,
    /// Ingredients, in order
    pub ingredients: Vec<String>,
    /// Preparation steps, in order
    pub instructions: Vec<String>,
    /// Dietary labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

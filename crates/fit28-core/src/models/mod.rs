// ABOUTME: Core data models shared by the application store and the remote collaborator
// ABOUTME: Re-exports profile, catalog entity and log row types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Badge catalog entries
pub mod badge;
/// Journal entries
pub mod journal;
/// Backend rows for append-only logs and progress markers
pub mod logs;
/// Mindset lessons
pub mod mindset;
/// User profile and its backend row
pub mod profile;
/// Recipe library entries
pub mod recipe;
/// Program workouts
pub mod workout;

pub use badge::Badge;
pub use journal::JournalEntry;
pub use logs::{JournalRow, MindsetProgressRow, WaterLogRow, WeightLogRow, WorkoutProgressRow};
pub use mindset::{MediaType, MindsetItem};
pub use profile::{PhotoKind, ProfilePatch, ProfileRow, UserProfile, WeightSample};
pub use recipe::{Recipe, RecipeCategory};
pub use workout::{Difficulty, Workout};

// ABOUTME: The built-in 28-day home-workout program
// ABOUTME: First week is free; later days require premium entitlement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28_core::constants::program::FREE_DAYS;
use fit28_core::models::{Difficulty, Workout};

/// (title, description, minutes)
const DAYS: [(&str, &str, u32); 28] = [
    ("Full Body Wake-Up", "Gentle full body circuit to build the habit", 15),
    ("Lower Body Basics", "Squats, lunges and glute bridges", 18),
    ("Core Foundations", "Planks, dead bugs and bird dogs", 15),
    ("Upper Body Tone", "Push-up progressions and arm circles", 18),
    ("Low Impact Cardio", "Marching intervals that spare the joints", 20),
    ("Mobility Flow", "Hips, shoulders and spine mobility", 15),
    ("Week One Challenge", "Everything from this week in one session", 22),
    ("Glute Burn", "Banded glute work and hip thrusts", 20),
    ("Cardio Intervals", "30 seconds on, 30 seconds off", 20),
    ("Core Strength", "Hollow holds, side planks and crunch variations", 20),
    ("Push Day", "Chest, shoulders and triceps at home", 22),
    ("Leg Day", "Split squats, step-ups and wall sits", 24),
    ("Active Recovery", "Light movement and stretching", 15),
    ("Halfway HIIT", "High intensity circuit to mark the halfway point", 25),
    ("Pull and Posture", "Back and posture work with a towel", 22),
    ("Lower Body Power", "Jump squats and reverse lunges", 25),
    ("Core Burner", "Fast-paced abs finisher", 20),
    ("Total Body Sculpt", "Compound moves for the whole body", 26),
    ("Cardio Dance", "Fun dance cardio session", 25),
    ("Yoga Stretch", "Long holds for flexibility", 20),
    ("Three Week Test", "Benchmark circuit to measure progress", 28),
    ("Tabata Blast", "Four rounds of tabata", 25),
    ("Advanced Legs", "Pistol squat progressions and pulses", 28),
    ("Advanced Core", "Ab rollouts and V-ups", 25),
    ("Upper Body Burn", "Pike push-ups and plank walks", 28),
    ("Athletic Conditioning", "Agility and conditioning drills", 30),
    ("Deep Recovery", "Mobility and breathwork before the finale", 20),
    ("Final Challenge", "The full program in one last session", 35),
];

fn difficulty_for(day: u32) -> Difficulty {
    match day {
        1..=7 => Difficulty::Beginner,
        8..=21 => Difficulty::Intermediate,
        _ => Difficulty::Advanced,
    }
}

pub(super) fn workouts() -> Vec<Workout> {
    (1u32..)
        .zip(DAYS)
        .map(|(day, (title, description, minutes))| Workout {
            id: day,
            day_number: day,
            title: title.to_owned(),
            description: description.to_owned(),
            thumbnail_url: format!("workouts/day-{day:02}.jpg"),
            video_url: format!("workouts/day-{day:02}.mp4"),
            duration_minutes: minutes,
            difficulty: difficulty_for(day),
            is_locked: day > FREE_DAYS,
            completed: false,
        })
        .collect()
}

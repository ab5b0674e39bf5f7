// ABOUTME: The built-in mindset lesson catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28_core::models::{MediaType, MindsetItem};

const LESSONS: [(&str, &str, MediaType); 8] = [
    ("Why You Started", "6 min", MediaType::Audio),
    ("Building Habits That Stick", "9 min", MediaType::Video),
    ("Morning Intention Setting", "5 min", MediaType::Audio),
    ("Overcoming the Plateau", "8 min", MediaType::Video),
    ("Body Kindness", "7 min", MediaType::Audio),
    ("Sleep and Recovery", "10 min", MediaType::Video),
    ("Mindful Eating", "6 min", MediaType::Audio),
    ("Life After Day 28", "12 min", MediaType::Video),
];

pub(super) fn lessons() -> Vec<MindsetItem> {
    (1u32..)
        .zip(LESSONS)
        .map(|(id, (title, duration, media_type))| MindsetItem {
            id,
            title: title.to_owned(),
            duration: duration.to_owned(),
            media_type,
            completed: false,
        })
        .collect()
}

// ABOUTME: The built-in badge catalog
// ABOUTME: Order matters: the first badge not yet earned is the "next badge"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28_core::constants::badge_ids;
use fit28_core::models::Badge;

fn badge(id: &str, title: &str, description: &str, icon: &str, color: &str) -> Badge {
    Badge {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        color: color.to_owned(),
    }
}

pub(super) fn badges() -> Vec<Badge> {
    vec![
        badge(badge_ids::FIRST_STEP, "First Step", "Complete your first workout", "footprints", "rose"),
        badge(badge_ids::FIRST_WEIGH_IN, "Weigh-In", "Log your weight for the first time", "scale", "sky"),
        badge(badge_ids::HYDRATED, "Hydrated", "Drink 2 liters of water in a day", "droplet", "cyan"),
        badge(badge_ids::REFLECTIVE, "Reflective", "Write your first journal entry", "notebook", "violet"),
        badge(badge_ids::MINDFUL, "Mindful", "Finish a mindset lesson", "brain", "amber"),
        badge(badge_ids::WEEK_ONE, "Week One Done", "Complete 7 workouts", "calendar-check", "emerald"),
        badge(badge_ids::HALFWAY, "Halfway There", "Complete 14 workouts", "flag", "orange"),
        badge(badge_ids::FINISHER, "28-Day Finisher", "Complete the whole program", "trophy", "yellow"),
    ]
}

// ABOUTME: The built-in recipe library
// ABOUTME: Read-only reference data grouped by meal category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28_core::models::{Recipe, RecipeCategory};

struct RecipeSpec {
    title: &'static str,
    calories: u32,
    time_minutes: u32,
    category: RecipeCategory,
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
    tags: &'static [&'static str],
}

const RECIPES: &[RecipeSpec] = &[
    RecipeSpec {
        title: "Berry Protein Oats",
        calories: 340,
        time_minutes: 10,
        category: RecipeCategory::Breakfast,
        ingredients: &["50 g rolled oats", "200 ml almond milk", "1 scoop vanilla protein", "80 g mixed berries"],
        instructions: &["Simmer oats in almond milk for 5 minutes", "Stir in the protein powder off the heat", "Top with berries"],
        tags: &["vegetarian", "high-protein"],
    },
    RecipeSpec {
        title: "Spinach Egg Muffins",
        calories: 210,
        time_minutes: 25,
        category: RecipeCategory::Breakfast,
        ingredients: &["4 eggs", "1 handful spinach", "6 cherry tomatoes", "30 g feta"],
        instructions: &["Whisk the eggs", "Fold in chopped spinach, tomatoes and feta", "Bake in a muffin tin at 180 C for 18 minutes"],
        tags: &["vegetarian", "gluten-free"],
    },
    RecipeSpec {
        title: "Greek Yogurt Parfait",
        calories: 260,
        time_minutes: 5,
        category: RecipeCategory::Breakfast,
        ingredients: &["170 g greek yogurt", "30 g granola", "1 tsp honey", "50 g strawberries"],
        instructions: &["Layer yogurt and granola in a glass", "Add strawberries and drizzle with honey"],
        tags: &["vegetarian"],
    },
    RecipeSpec {
        title: "Chicken Quinoa Bowl",
        calories: 480,
        time_minutes: 25,
        category: RecipeCategory::Lunch,
        ingredients: &["120 g chicken breast", "80 g cooked quinoa", "1/2 avocado", "1 cup rocket", "1 tbsp lemon dressing"],
        instructions: &["Season and grill the chicken", "Slice and arrange over quinoa and rocket", "Add avocado and dressing"],
        tags: &["high-protein", "gluten-free"],
    },
    RecipeSpec {
        title: "Lentil Veggie Soup",
        calories: 320,
        time_minutes: 35,
        category: RecipeCategory::Lunch,
        ingredients: &["100 g red lentils", "1 carrot", "1 celery stick", "1 onion", "750 ml vegetable stock"],
        instructions: &["Saute the chopped vegetables", "Add lentils and stock", "Simmer for 20 minutes and blend half"],
        tags: &["vegan", "gluten-free"],
    },
    RecipeSpec {
        title: "Tuna Lettuce Wraps",
        calories: 290,
        time_minutes: 10,
        category: RecipeCategory::Lunch,
        ingredients: &["1 can tuna", "1 tbsp light mayo", "1/2 cucumber", "4 lettuce leaves"],
        instructions: &["Mix tuna with mayo and diced cucumber", "Spoon into lettuce leaves and roll"],
        tags: &["low-carb", "high-protein"],
    },
    RecipeSpec {
        title: "Baked Salmon and Greens",
        calories: 520,
        time_minutes: 30,
        category: RecipeCategory::Dinner,
        ingredients: &["150 g salmon fillet", "150 g green beans", "1 tbsp olive oil", "1 lemon"],
        instructions: &["Roast salmon and beans at 200 C for 15 minutes", "Finish with lemon juice"],
        tags: &["gluten-free", "omega-3"],
    },
    RecipeSpec {
        title: "Turkey Zucchini Stir-Fry",
        calories: 430,
        time_minutes: 20,
        category: RecipeCategory::Dinner,
        ingredients: &["130 g turkey mince", "1 zucchini", "1 red pepper", "1 tbsp soy sauce", "1 tsp ginger"],
        instructions: &["Brown the turkey in a hot pan", "Add sliced vegetables and ginger", "Season with soy sauce and serve"],
        tags: &["high-protein", "low-carb"],
    },
    RecipeSpec {
        title: "Chickpea Curry",
        calories: 450,
        time_minutes: 30,
        category: RecipeCategory::Dinner,
        ingredients: &["1 can chickpeas", "200 ml light coconut milk", "1 tbsp curry paste", "1 handful spinach"],
        instructions: &["Fry the curry paste for a minute", "Add chickpeas and coconut milk and simmer 15 minutes", "Wilt in the spinach"],
        tags: &["vegan"],
    },
    RecipeSpec {
        title: "Apple and Almond Butter",
        calories: 190,
        time_minutes: 2,
        category: RecipeCategory::Snack,
        ingredients: &["1 apple", "1 tbsp almond butter"],
        instructions: &["Slice the apple and serve with almond butter"],
        tags: &["vegan", "gluten-free"],
    },
    RecipeSpec {
        title: "Roasted Chickpeas",
        calories: 150,
        time_minutes: 30,
        category: RecipeCategory::Snack,
        ingredients: &["1 can chickpeas", "1 tsp olive oil", "1 tsp smoked paprika"],
        instructions: &["Dry the chickpeas well", "Toss with oil and paprika", "Roast at 200 C for 25 minutes"],
        tags: &["vegan", "high-fiber"],
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

pub(super) fn recipes() -> Vec<Recipe> {
    (1u32..)
        .zip(RECIPES)
        .map(|(id, spec)| Recipe {
            id,
            title: spec.title.to_owned(),
            calories: spec.calories,
            time_minutes: spec.time_minutes,
            category: spec.category,
            image_url: format!("recipes/{id:02}.jpg"),
            ingredients: owned(spec.ingredients),
            instructions: owned(spec.instructions),
            tags: owned(spec.tags),
        })
        .collect()
}

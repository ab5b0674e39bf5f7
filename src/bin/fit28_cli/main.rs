// ABOUTME: fit28 CLI - command-line presentation shell over the application store
// ABOUTME: Handles sign-in, tracking actions and catalog browsing against the hosted backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Sign in; the session is persisted for later commands
//! fit28-cli login --email sam@example.com --password yourpassword
//!
//! # Create an account
//! fit28-cli register --email sam@example.com --password yourpassword --name "Sam Rivera"
//!
//! # Dashboard summary
//! fit28-cli status
//!
//! # Track progress
//! fit28-cli log-weight 68.4
//! fit28-cli log-water 0.5
//! fit28-cli journal "Felt strong today"
//! fit28-cli complete-workout 3
//!
//! # Browse the catalogs
//! fit28-cli program
//! fit28-cli recipes --category breakfast
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use fit28::backend::http_client::initialize_shared_client;
use fit28::backend::rest::RestBackend;
use fit28::catalog::Catalog;
use fit28::config::AppConfig;
use fit28::errors::AppResult;
use fit28::logging::LoggingConfig;
use fit28::models::PhotoKind;
use fit28::store::Store;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fit28-cli",
    about = "fit28 28-day program CLI",
    long_about = "Command-line shell for the fit28 program: sign in, log weight, water and journal entries, complete workouts and browse recipes."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Create a new account
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
    },

    /// Send a password recovery link
    ResetPassword {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Sign out and forget the persisted session
    Logout,

    /// Dashboard summary: BMI, progress, next workout and badge, water
    Status,

    /// Weekly report and transformation summary
    Report,

    /// Record a body weight in kg
    LogWeight {
        /// Weight in kg
        kg: f64,
    },

    /// Add liters to today's water total
    LogWater {
        /// Volume in liters
        liters: f64,
    },

    /// Write a journal entry
    Journal {
        /// Entry text
        text: String,
    },

    /// Mark a program workout as completed
    CompleteWorkout {
        /// Workout id
        id: u32,
    },

    /// Mark a mindset lesson as completed
    CompleteMindset {
        /// Lesson id
        id: u32,
    },

    /// Overwrite height, target weight and current weight
    SetStats {
        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Target weight in kg
        #[arg(long)]
        target: f64,

        /// Current weight in kg
        #[arg(long)]
        current: f64,
    },

    /// Set a progress photo reference
    Photo {
        /// Which photo: start or current
        #[arg(long, value_parser = parse_photo_kind)]
        kind: PhotoKind,

        /// Image reference
        url: String,
    },

    /// List the 28-day program
    Program,

    /// List recipes
    Recipes {
        /// Only one meal category (breakfast, lunch, dinner, snack)
        #[arg(long)]
        category: Option<String>,
    },
}

fn parse_photo_kind(raw: &str) -> Result<PhotoKind, String> {
    match raw.to_lowercase().as_str() {
        "start" => Ok(PhotoKind::Start),
        "current" => Ok(PhotoKind::Current),
        other => Err(format!("unknown photo kind '{other}', use start or current")),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    LoggingConfig::from_env().with_level(log_level).init()?;

    let config = AppConfig::from_env()?;
    initialize_shared_client(
        config.backend.http_timeout_secs,
        config.backend.http_connect_timeout_secs,
    );
    let backend = Arc::new(RestBackend::new(&config.backend));
    let mut store = Store::new(backend, Arc::new(Catalog::builtin()))?
        .with_password_reset_redirect(config.backend.password_reset_redirect.clone());

    let signed_in = store.bootstrap().await;
    debug!(signed_in, environment = %config.environment, "Store bootstrapped");

    let outcome = run(&mut store, cli.command).await;
    store.flush().await;
    helpers::display::report_sync_failures(&store.sync_failures());
    outcome
}

async fn run(store: &mut Store, command: Command) -> AppResult<()> {
    match command {
        Command::Login { email, password } => {
            commands::account::login(store, &email, &password).await
        }
        Command::Register {
            email,
            password,
            name,
            phone,
        } => {
            commands::account::register(store, &email, &password, &name, phone.as_deref()).await
        }
        Command::ResetPassword { email } => {
            commands::account::reset_password(store, &email).await;
            Ok(())
        }
        Command::Logout => {
            commands::account::logout(store).await;
            Ok(())
        }
        Command::Status => commands::tracking::status(store),
        Command::Report => commands::tracking::report(store),
        Command::LogWeight { kg } => commands::tracking::log_weight(store, kg),
        Command::LogWater { liters } => commands::tracking::log_water(store, liters),
        Command::Journal { text } => commands::tracking::journal(store, text),
        Command::CompleteWorkout { id } => commands::tracking::complete_workout(store, id),
        Command::CompleteMindset { id } => commands::tracking::complete_mindset(store, id),
        Command::SetStats {
            height,
            target,
            current,
        } => commands::tracking::set_stats(store, height, target, current),
        Command::Photo { kind, url } => commands::tracking::photo(store, kind, url),
        Command::Program => commands::catalog::program(store),
        Command::Recipes { category } => commands::catalog::recipes(store, category.as_deref()),
    }
}

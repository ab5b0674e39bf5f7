// ABOUTME: Account commands for fit28-cli
// ABOUTME: Handles login, registration, password reset and logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fit28::errors::AppResult;
use fit28::store::{RegisterOutcome, Store};
use tracing::info;

type Result<T> = AppResult<T>;

/// Sign in and show the dashboard
pub async fn login(store: &mut Store, email: &str, password: &str) -> Result<()> {
    store.login(email, password).await?;
    if let Some(user) = store.state().user() {
        println!("Signed in as {} ({})", user.full_name, user.email);
    }
    super::tracking::status(store)
}

/// Create an account
pub async fn register(
    store: &mut Store,
    email: &str,
    password: &str,
    name: &str,
    phone: Option<&str>,
) -> Result<()> {
    match store.register(email, password, name, phone).await? {
        RegisterOutcome::SignedIn => {
            println!("Account created, welcome {name}!");
            super::tracking::status(store)
        }
        RegisterOutcome::VerificationRequired => {
            info!("Registration pending email verification");
            println!("Account created. Check {email} for a confirmation link, then log in.");
            Ok(())
        }
    }
}

/// Request a recovery link
pub async fn reset_password(store: &Store, email: &str) {
    if store.reset_password(email).await {
        println!("If {email} has an account, a recovery link is on its way.");
    } else {
        println!("Could not request a recovery link, try again later.");
    }
}

/// Sign out
pub async fn logout(store: &mut Store) {
    store.logout().await;
    println!("Signed out.");
}

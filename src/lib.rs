// ABOUTME: Main library entry point for the fit28 28-day home-workout client core
// ABOUTME: Application store, remote collaborator clients, catalogs, configuration and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # fit28
//!
//! Client core of a 28-day home-workout program: progress tracking (weight,
//! hydration, journaling, photos), a recipe library, mindset lessons and
//! badges, backed by a hosted auth + row-store service.
//!
//! ## Architecture
//!
//! - **Store**: [`store::Store`] owns the session state and applies user
//!   actions optimistically, dispatching remote writes in the background
//! - **Backend**: [`backend::RemoteBackend`] abstracts the hosted service; a
//!   REST client and an in-memory implementation are provided
//! - **Catalog**: static reference data shared by every session
//! - **Config**: environment-only configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fit28::backend::rest::RestBackend;
//! use fit28::catalog::Catalog;
//! use fit28::config::AppConfig;
//! use fit28::errors::AppResult;
//! use fit28::store::Store;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let backend = Arc::new(RestBackend::new(&config.backend));
//!     let mut store = Store::new(backend, Arc::new(Catalog::builtin()))?;
//!
//!     if store.bootstrap().await {
//!         println!("Program progress: {}%", store.state().program_progress_percent());
//!     }
//!     Ok(())
//! }
//! ```

/// Remote persistence collaborator boundary and implementations
pub mod backend;

/// Static reference catalogs
pub mod catalog;

/// Environment configuration
pub mod config;

/// Unified error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Application store
pub mod store;

pub use fit28_core::{constants, models};

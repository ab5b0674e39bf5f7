// ABOUTME: Core types and constants for the fit28 home-workout tracker
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # fit28 Core
//!
//! Foundation crate providing the shared domain model and error taxonomy for the
//! fit28 application. Everything here is plain data; behavior lives in the
//! application store of the main crate.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Profile defaults, collection names, badge identifiers
//! - **models**: Profile, workout, recipe, badge, journal, mindset and log rows

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models shared between the store and the remote collaborator
pub mod models;

// ABOUTME: Configuration management module for collaborator connection and runtime options
// ABOUTME: Environment-only configuration, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable parsing
pub mod environment;

pub use environment::{AppConfig, BackendConfig, Environment};

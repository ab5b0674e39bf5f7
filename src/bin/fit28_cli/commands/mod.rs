// ABOUTME: Re-exports command modules for fit28-cli
// ABOUTME: Provides access to account, tracking and catalog commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod account;
pub mod catalog;
pub mod tracking;

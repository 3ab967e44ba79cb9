// ABOUTME: Configuration management module for the football coach
// ABOUTME: Environment-driven settings for the Gemini credential, model, diagram alignment, and exports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: `CoachConfig` loaded from environment variables
//! - **Types**: strongly typed enums (`LogLevel`, `DiagramAlignment`) parsed
//!   leniently from configuration strings

/// Environment-based configuration
pub mod environment;
/// Configuration enums shared across modules
pub mod types;

pub use environment::CoachConfig;
pub use types::{DiagramAlignment, LogLevel};

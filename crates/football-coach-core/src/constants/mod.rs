// ABOUTME: Constants module with domain-separated organization
// ABOUTME: User-facing Spanish messages, environment variable names, models, and limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large file. User-facing strings are Spanish, matching the language the
//! plans are generated in.

/// Localized messages shown to the user
pub mod messages;

/// Environment variable names
pub mod env_vars {
    /// Primary API key variable for the Gemini service
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Fallback API key variable
    pub const API_KEY: &str = "API_KEY";
    /// Model override
    pub const MODEL: &str = "COACH_LLM_MODEL";
    /// Diagram alignment (`positional` or `named`)
    pub const DIAGRAM_ALIGNMENT: &str = "COACH_DIAGRAM_ALIGNMENT";
    /// Directory where exports are written
    pub const EXPORT_DIR: &str = "COACH_EXPORT_DIR";
    /// Base URL override for the Gemini API
    pub const API_BASE_URL: &str = "GEMINI_API_BASE_URL";
}

/// LLM model identifiers
pub mod models {
    /// Default text and structured generation model
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
}

/// Training session limits
pub mod limits {
    /// Shortest session the structured wizard accepts, in minutes
    pub const MIN_DURATION_MINUTES: u16 = 30;
    /// Longest session the structured wizard accepts, in minutes
    pub const MAX_DURATION_MINUTES: u16 = 120;
    /// Initial duration shown by the wizard, in minutes
    pub const DEFAULT_DURATION_MINUTES: u16 = 60;
    /// Step used when the wizard adjusts the duration
    pub const DURATION_STEP_MINUTES: u16 = 15;
}

/// Export rendering parameters
pub mod export {
    /// Capture scale applied to image and PDF snapshots
    pub const CAPTURE_SCALE: u32 = 2;
    /// Logical width of the captured view, in CSS pixels
    pub const VIEW_WIDTH: u32 = 800;
    /// Diagram canvas width declared by the diagram prompt
    pub const DIAGRAM_WIDTH: u32 = 400;
    /// Diagram canvas height declared by the diagram prompt
    pub const DIAGRAM_HEIGHT: u32 = 250;
    /// File name stem used for exported plans
    pub const FILE_STEM: &str = "plan-entrenamiento";
}

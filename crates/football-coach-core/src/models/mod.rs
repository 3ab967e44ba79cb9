// ABOUTME: Core data models shared by the library and the CLI
// ABOUTME: Re-exports training preference types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Training preferences (free-text and structured variants)
pub mod preferences;

pub use preferences::{
    Difficulty, GroupSize, Preferences, SelectionDraft, Selections, SessionMinutes, TeamSize,
    TrainingType,
};

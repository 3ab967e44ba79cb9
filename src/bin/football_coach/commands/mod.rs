// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for the football coach CLI
// ABOUTME: Provides plan generation, the wizard, offline parsing, and diagram requests

pub mod diagrams;
pub mod parse;
pub mod plan;
pub mod wizard;

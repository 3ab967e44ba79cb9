// ABOUTME: Error handling re-exports from the core crate
// ABOUTME: Keeps `crate::errors::AppError` paths stable for every library module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `football-coach-core` so the core models can use
//! them; this module re-exports them for the rest of the library.

pub use football_coach_core::errors::{AppError, AppResult, ErrorCode};

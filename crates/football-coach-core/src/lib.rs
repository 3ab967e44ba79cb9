// ABOUTME: Core types and constants for the AI football coach
// ABOUTME: Foundation crate with error handling, user-facing messages, and preference models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Football Coach Core
//!
//! Foundation crate providing shared types and constants for the football
//! coach. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Localized user messages, environment variable names, and limits
//! - **models**: Training preferences collected before a plan is requested

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Training preference models (training type, difficulty, duration, group size)
pub mod models;

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for the football coach CLI
// ABOUTME: Provides terminal output formatting and provider construction

pub mod display;
pub mod provider;

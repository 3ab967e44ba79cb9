// ABOUTME: Main library entry point for the AI football coach
// ABOUTME: Generates training plans with Gemini, parses them, attaches diagrams, and exports them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Football Coach
//!
//! Turns a coach's preferences into a structured football training plan.
//!
//! ## Features
//!
//! - **Preference collection**: free-text description or a structured wizard
//! - **Plan generation**: one Gemini request per plan, plain text back
//! - **Heuristic parsing**: title, phase headings, exercises, paragraphs
//! - **Tactical diagrams**: SVG diagrams for main-phase exercises, aligned
//!   by position or by name
//! - **Export**: HTML, SVG snapshot, single-page PDF, or JSON
//!
//! ## Architecture
//!
//! - **Plan**: prompt request and the heuristic parser
//! - **Diagrams**: exercise extraction, structured request, response decoding
//! - **LLM**: provider trait and the Gemini client
//! - **Session**: step wizard tying the requestors together
//! - **Render / Export**: text, HTML, and file exports
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use football_coach::config::CoachConfig;
//! use football_coach::errors::AppResult;
//! use football_coach::llm::GeminiProvider;
//! use football_coach::session::CoachSession;
//! use football_coach_core::models::GroupSize;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = CoachConfig::from_env();
//!     let provider = Arc::new(GeminiProvider::from_config(&config)?);
//!
//!     let mut session = CoachSession::from_config(provider, &config);
//!     session.set_description("Mejorar el regate en espacios reducidos");
//!     session.set_group_size(GroupSize::SmallGroup);
//!     session.generate_plan().await?;
//!
//!     if let Some(plan) = session.parsed_plan() {
//!         println!("{}", plan.title);
//!     }
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Diagram extraction, request, and alignment
pub mod diagrams;

/// Unified error handling
pub mod errors;

/// File exports of a parsed plan
pub mod export;

/// LLM provider abstraction and the Gemini client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Plan request and heuristic parsing
pub mod plan;

/// Text and HTML rendering
pub mod render;

/// Step wizard session
pub mod session;

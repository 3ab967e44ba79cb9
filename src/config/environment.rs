// ABOUTME: Environment configuration for the football coach CLI and library
// ABOUTME: Loads the Gemini credential, model, diagram alignment, export directory, and log level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Loading never fails: the offline `parse` command must work without a
//! credential. Commands that call the generation service ask for the key
//! through [`CoachConfig::require_api_key`], which is where a missing
//! credential becomes a fatal configuration error.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::PathBuf;

use football_coach_core::constants::{env_vars, models};
use tracing::{debug, info};

use super::types::{DiagramAlignment, LogLevel};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Runtime configuration for plan generation, diagrams, and export
#[derive(Clone)]
pub struct CoachConfig {
    /// Gemini API key, if configured
    pub api_key: Option<String>,
    /// Model used for both text and structured generation
    pub model: String,
    /// How diagrams are matched back to exercises
    pub diagram_alignment: DiagramAlignment,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    /// Override for the Gemini API base URL
    pub api_base_url: Option<String>,
    /// Log level named by `RUST_LOG`; warn when unset
    pub log_level: LogLevel,
}

impl CoachConfig {
    /// Load configuration from process environment variables
    #[must_use]
    pub fn from_env() -> Self {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(env_vars::GEMINI_API_KEY).or_else(|| get(env_vars::API_KEY));
        let model = get(env_vars::MODEL).unwrap_or_else(|| models::DEFAULT_MODEL.to_owned());
        let diagram_alignment = get(env_vars::DIAGRAM_ALIGNMENT)
            .map(|v| DiagramAlignment::from_str_or_default(&v))
            .unwrap_or_default();
        let export_dir = get(env_vars::EXPORT_DIR)
            .map_or_else(default_export_dir, PathBuf::from);
        let api_base_url = get(env_vars::API_BASE_URL);
        let log_level =
            get("RUST_LOG").map_or(LogLevel::Warn, |v| LogLevel::from_str_or_default(&v));

        let config = Self {
            api_key,
            model,
            diagram_alignment,
            export_dir,
            api_base_url,
            log_level,
        };

        debug!(
            model = %config.model,
            diagram_alignment = %config.diagram_alignment,
            export_dir = %config.export_dir.display(),
            has_api_key = config.api_key.is_some(),
            "Configuration resolved"
        );

        config
    }

    /// The API key, or a fatal configuration error when it is absent
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when neither `GEMINI_API_KEY` nor `API_KEY` is set.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!(
                    "{} environment variable not set (or {})",
                    env_vars::GEMINI_API_KEY,
                    env_vars::API_KEY
                ),
            )
        })
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: models::DEFAULT_MODEL.to_owned(),
            diagram_alignment: DiagramAlignment::default(),
            export_dir: default_export_dir(),
            api_base_url: None,
            log_level: LogLevel::Warn,
        }
    }
}

impl Debug for CoachConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CoachConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("diagram_alignment", &self.diagram_alignment)
            .field("export_dir", &self.export_dir)
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// The user's download directory, falling back to the working directory
fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

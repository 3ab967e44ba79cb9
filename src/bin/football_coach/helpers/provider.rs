// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Builds the shared Gemini provider from configuration
// ABOUTME: Fails fast with a configuration error when no API key is set

use std::sync::Arc;

use football_coach::config::CoachConfig;
use football_coach::errors::AppResult;
use football_coach::llm::{GeminiProvider, LlmProvider};
use tracing::info;

/// Create the provider shared by the plan and diagram requestors
pub fn build_provider(config: &CoachConfig) -> AppResult<Arc<dyn LlmProvider>> {
    let provider = GeminiProvider::from_config(config)?;
    info!(
        provider = provider.display_name(),
        model = %config.model,
        "LLM provider ready"
    );
    Ok(Arc::new(provider))
}

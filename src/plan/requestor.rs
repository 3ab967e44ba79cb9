// ABOUTME: Sends collected preferences to the text generation service and returns the raw plan
// ABOUTME: Validates input first so a blank description never reaches the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use football_coach_core::models::Preferences;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, AppResult};
use crate::llm::prompts::plan_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Requests training plans from an [`LlmProvider`]
#[derive(Clone)]
pub struct PlanRequestor {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
}

impl PlanRequestor {
    /// Create a requestor using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: None,
        }
    }

    /// Override the model for plan requests
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Request a plan for the given preferences
    ///
    /// # Errors
    ///
    /// Returns a validation error (and issues no request) when the preferences
    /// are incomplete, or an external service error when generation fails or
    /// comes back empty.
    #[instrument(skip(self, preferences), fields(provider = self.provider.name()))]
    pub async fn request(&self, preferences: &Preferences) -> AppResult<String> {
        preferences.validate()?;

        let mut request = ChatRequest::new(vec![ChatMessage::user(plan_prompt(preferences))]);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let response = self.provider.complete(&request).await?;
        let plan = response.content.trim();
        if plan.is_empty() {
            warn!(model = %response.model, "Generation service returned an empty plan");
            return Err(AppError::external_service(
                self.provider.display_name(),
                "empty plan returned",
            ));
        }

        info!(
            model = %response.model,
            chars = plan.len(),
            total_tokens = response.total_tokens(),
            "Training plan generated"
        );
        Ok(plan.to_owned())
    }
}

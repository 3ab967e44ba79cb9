// ABOUTME: Step-wizard session driving preference collection, plan generation, and diagrams
// ABOUTME: Owns the plan text and diagram collection and re-derives the parsed view on demand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Session
//!
//! A session follows one of two flows:
//!
//! - free text: `Start → Generating → Plan`
//! - structured: `Start → TrainingType → Difficulty → Duration → GroupSize → Generating → Plan`
//!
//! Failures never end the session. Validation failures keep the current step
//! and issue no request; upstream failures store a fixed localized message
//! and return to the step the request was made from.

use std::sync::Arc;

use football_coach_core::constants::messages;
use football_coach_core::models::{
    Difficulty, GroupSize, Preferences, SelectionDraft, SessionMinutes, TeamSize, TrainingType,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CoachConfig;
use crate::diagrams::{DiagramRequestor, Diagrams};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::LlmProvider;
use crate::plan::{parse_plan, ParsedPlan, PlanRequestor};

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStep {
    /// Free-text entry, or the entry point of the structured flow
    #[default]
    Start,
    /// Choosing the training type
    TrainingType,
    /// Choosing the difficulty
    Difficulty,
    /// Adjusting the duration
    Duration,
    /// Choosing solo or group
    GroupSize,
    /// Waiting for the plan
    Generating,
    /// Showing the plan
    Plan,
}

impl AppStep {
    /// Whether the user can act on this step
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        !matches!(self, Self::Generating)
    }

    /// Previous step of the structured flow
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::TrainingType => Self::Start,
            Self::Difficulty => Self::TrainingType,
            Self::Duration => Self::Difficulty,
            Self::GroupSize => Self::Duration,
            other => other,
        }
    }
}

/// Interactive session state
pub struct CoachSession {
    plan_requestor: PlanRequestor,
    diagram_requestor: DiagramRequestor,
    step: AppStep,
    structured: bool,
    description: String,
    group_size: GroupSize,
    draft: SelectionDraft,
    plan: Option<String>,
    diagrams: Option<Diagrams>,
    generating_diagrams: bool,
    error: Option<String>,
}

impl CoachSession {
    /// Create a session from explicit requestors
    #[must_use]
    pub fn new(plan_requestor: PlanRequestor, diagram_requestor: DiagramRequestor) -> Self {
        Self {
            plan_requestor,
            diagram_requestor,
            step: AppStep::Start,
            structured: false,
            description: String::new(),
            group_size: GroupSize::default(),
            draft: SelectionDraft::default(),
            plan: None,
            diagrams: None,
            generating_diagrams: false,
            error: None,
        }
    }

    /// Create a session sharing one provider between both requestors
    #[must_use]
    pub fn from_config(provider: Arc<dyn LlmProvider>, config: &CoachConfig) -> Self {
        let plan_requestor = PlanRequestor::new(Arc::clone(&provider)).with_model(&config.model);
        let diagram_requestor = DiagramRequestor::new(provider)
            .with_model(&config.model)
            .with_alignment(config.diagram_alignment);
        Self::new(plan_requestor, diagram_requestor)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current step
    #[must_use]
    pub const fn step(&self) -> AppStep {
        self.step
    }

    /// Localized message from the last failed action
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Raw plan text, once generated
    #[must_use]
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    /// Diagrams, once generated
    #[must_use]
    pub const fn diagrams(&self) -> Option<&Diagrams> {
        self.diagrams.as_ref()
    }

    /// Structured selections collected so far
    #[must_use]
    pub const fn draft(&self) -> &SelectionDraft {
        &self.draft
    }

    /// Whether a diagram request is running
    #[must_use]
    pub const fn is_generating_diagrams(&self) -> bool {
        self.generating_diagrams
    }

    /// Whether diagrams can be requested now
    #[must_use]
    pub const fn can_generate_diagrams(&self) -> bool {
        self.plan.is_some() && self.diagrams.is_none() && !self.generating_diagrams
    }

    /// Parsed view of the current plan and diagrams
    #[must_use]
    pub fn parsed_plan(&self) -> Option<ParsedPlan> {
        self.plan
            .as_deref()
            .map(|plan| parse_plan(plan, self.diagrams.as_ref()))
    }

    // ------------------------------------------------------------------
    // Free-text flow
    // ------------------------------------------------------------------

    /// Set the free-text description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Set the free-text group size
    pub fn set_group_size(&mut self, group_size: GroupSize) {
        self.group_size = group_size;
    }

    // ------------------------------------------------------------------
    // Structured flow
    // ------------------------------------------------------------------

    /// Enter the structured flow
    pub fn start_structured(&mut self) {
        self.structured = true;
        self.move_to(AppStep::TrainingType);
    }

    /// Choose the training type and advance
    pub fn choose_training_type(&mut self, training_type: TrainingType) {
        self.draft.training_type = Some(training_type);
        self.move_to(AppStep::Difficulty);
    }

    /// Choose the difficulty and advance
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        self.draft.difficulty = Some(difficulty);
        self.move_to(AppStep::Duration);
    }

    /// Add one step to the duration, saturating at the maximum
    pub fn increase_duration(&mut self) -> SessionMinutes {
        self.draft.duration = self.draft.duration.increased();
        self.draft.duration
    }

    /// Remove one step from the duration, saturating at the minimum
    pub fn decrease_duration(&mut self) -> SessionMinutes {
        self.draft.duration = self.draft.duration.decreased();
        self.draft.duration
    }

    /// Set an exact duration
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` outside 30..=120 minutes; the draft is unchanged.
    pub fn set_duration(&mut self, minutes: u16) -> AppResult<()> {
        self.draft.duration = SessionMinutes::new(minutes)?;
        Ok(())
    }

    /// Accept the duration and advance
    pub fn confirm_duration(&mut self) {
        self.move_to(AppStep::GroupSize);
    }

    /// Choose solo or group; generation is the next action
    pub fn choose_team_size(&mut self, team_size: TeamSize) {
        self.draft.group_size = Some(team_size);
    }

    /// Go back one step in the structured flow
    pub fn back(&mut self) {
        let previous = self.step.previous();
        if previous == AppStep::Start {
            self.structured = false;
        }
        self.move_to(previous);
    }

    fn move_to(&mut self, step: AppStep) {
        debug!(from = ?self.step, to = ?step, "Session step change");
        self.step = step;
        self.error = None;
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Preferences as currently collected
    ///
    /// # Errors
    ///
    /// Returns the localized validation error when they cannot be submitted.
    pub fn preferences(&self) -> AppResult<Preferences> {
        let preferences = if self.structured {
            Preferences::Structured(self.draft.complete()?)
        } else {
            Preferences::free_text(self.description.clone(), self.group_size)
        };
        preferences.validate()?;
        Ok(preferences)
    }

    /// Generate the plan from the collected preferences
    ///
    /// # Errors
    ///
    /// Validation errors carry their own message and leave the step as is.
    /// Upstream errors carry the fixed "problem generating the plan" message
    /// and return the session to the step the request was made from.
    pub async fn generate_plan(&mut self) -> AppResult<()> {
        let preferences = match self.preferences() {
            Ok(preferences) => preferences,
            Err(e) => {
                self.error = Some(e.message.clone());
                return Err(e);
            }
        };

        let return_step = self.step;
        self.step = AppStep::Generating;
        self.error = None;

        match self.plan_requestor.request(&preferences).await {
            Ok(plan) => {
                self.plan = Some(plan);
                self.diagrams = None;
                self.step = AppStep::Plan;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Plan generation failed");
                self.step = return_step;
                self.error = Some(messages::PLAN_GENERATION_FAILED.to_owned());
                Err(AppError::new(e.code, messages::PLAN_GENERATION_FAILED).with_source(e))
            }
        }
    }

    /// Generate diagrams for the current plan
    ///
    /// Does nothing when diagrams already exist. A count mismatch leaves an
    /// empty collection, which is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` before a plan exists, and the fixed
    /// "could not generate diagrams" message on upstream failure; the plan is
    /// kept either way.
    pub async fn generate_diagrams(&mut self) -> AppResult<()> {
        let Some(plan) = self.plan.clone() else {
            self.error = Some(messages::NO_PLAN_YET.to_owned());
            return Err(AppError::new(
                ErrorCode::ResourceUnavailable,
                messages::NO_PLAN_YET,
            ));
        };
        if self.diagrams.is_some() {
            debug!("Diagrams already generated for this plan");
            return Ok(());
        }

        self.generating_diagrams = true;
        self.error = None;
        let result = self.diagram_requestor.request(&plan).await;
        self.generating_diagrams = false;

        match result {
            Ok(diagrams) => {
                self.diagrams = Some(diagrams);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Diagram generation failed");
                self.error = Some(messages::DIAGRAM_GENERATION_FAILED.to_owned());
                Err(AppError::new(e.code, messages::DIAGRAM_GENERATION_FAILED).with_source(e))
            }
        }
    }

    /// Return to the initial state, keeping the requestors
    pub fn reset(&mut self) {
        self.step = AppStep::Start;
        self.structured = false;
        self.description.clear();
        self.group_size = GroupSize::default();
        self.draft = SelectionDraft::default();
        self.plan = None;
        self.diagrams = None;
        self.generating_diagrams = false;
        self.error = None;
    }
}

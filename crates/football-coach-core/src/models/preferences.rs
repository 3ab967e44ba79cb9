// ABOUTME: Training preference models collected before a plan is requested
// ABOUTME: Free-text description with group size, or structured type/difficulty/duration/group selections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Preferences
//!
//! Two shapes of user intent are supported:
//!
//! - **Free text**: a description of what the user wants to train plus a
//!   [`GroupSize`]. The model infers level and duration.
//! - **Structured**: explicit [`TrainingType`], [`Difficulty`], duration in
//!   minutes bounded to `[30, 120]`, and [`TeamSize`].
//!
//! Every enum displays its Spanish label and parses from that label or an
//! ASCII slug, ignoring case, accents, spaces and dashes.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{limits, messages};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Reduce a label to lowercase ASCII alphanumerics for lenient matching
fn normalize_label(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

fn unknown_option(kind: &str, value: &str, options: &[&str]) -> AppError {
    AppError::invalid_input(format!(
        "Unknown {kind} '{value}'. Expected one of: {}",
        options.join(", ")
    ))
}

/// Focus of the training session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    /// Ball skills and technique
    Tecnica,
    /// Endurance
    Resistencia,
    /// Tactics and positioning
    Tactica,
    /// Strength and conditioning
    Fisico,
    /// A mix of the above
    Combinado,
}

impl TrainingType {
    /// All options in wizard order
    pub const ALL: [Self; 5] = [
        Self::Tecnica,
        Self::Resistencia,
        Self::Tactica,
        Self::Fisico,
        Self::Combinado,
    ];

    /// Spanish display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tecnica => "Técnica",
            Self::Resistencia => "Resistencia",
            Self::Tactica => "Táctica",
            Self::Fisico => "Físico",
            Self::Combinado => "Combinado",
        }
    }
}

impl Display for TrainingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrainingType {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match normalize_label(s).as_str() {
            "tecnica" => Ok(Self::Tecnica),
            "resistencia" => Ok(Self::Resistencia),
            "tactica" => Ok(Self::Tactica),
            "fisico" => Ok(Self::Fisico),
            "combinado" => Ok(Self::Combinado),
            _ => Err(unknown_option(
                "training type",
                s,
                &Self::ALL.map(|t| t.label()),
            )),
        }
    }
}

/// Player level the session is pitched at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Beginner
    Basico,
    /// Intermediate
    Intermedio,
    /// Advanced
    Avanzado,
}

impl Difficulty {
    /// All options in wizard order
    pub const ALL: [Self; 3] = [Self::Basico, Self::Intermedio, Self::Avanzado];

    /// Spanish display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Basico => "Básico",
            Self::Intermedio => "Intermedio",
            Self::Avanzado => "Avanzado",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match normalize_label(s).as_str() {
            "basico" => Ok(Self::Basico),
            "intermedio" => Ok(Self::Intermedio),
            "avanzado" => Ok(Self::Avanzado),
            _ => Err(unknown_option(
                "difficulty",
                s,
                &Self::ALL.map(|d| d.label()),
            )),
        }
    }
}

/// Group size used with a free-text description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSize {
    /// A single player
    #[default]
    Solo,
    /// Two to six players
    SmallGroup,
    /// Seven or more players
    Team,
}

impl GroupSize {
    /// All options in display order
    pub const ALL: [Self; 3] = [Self::Solo, Self::SmallGroup, Self::Team];

    /// Spanish display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::SmallGroup => "Grupo Pequeño",
            Self::Team => "Equipo",
        }
    }
}

impl Display for GroupSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GroupSize {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match normalize_label(s).as_str() {
            "solo" => Ok(Self::Solo),
            "grupopequeno" | "pequeno" | "small" | "smallgroup" => Ok(Self::SmallGroup),
            "equipo" | "team" => Ok(Self::Team),
            _ => Err(unknown_option(
                "group size",
                s,
                &Self::ALL.map(|g| g.label()),
            )),
        }
    }
}

/// Group size used by the structured wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSize {
    /// A single player
    Solo,
    /// Training with others
    Grupo,
}

impl TeamSize {
    /// All options in wizard order
    pub const ALL: [Self; 2] = [Self::Solo, Self::Grupo];

    /// Spanish display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::Grupo => "En Grupo",
        }
    }
}

impl Display for TeamSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TeamSize {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match normalize_label(s).as_str() {
            "solo" => Ok(Self::Solo),
            "engrupo" | "grupo" => Ok(Self::Grupo),
            _ => Err(unknown_option("group size", s, &Self::ALL.map(|t| t.label()))),
        }
    }
}

/// Session length in minutes, always within `[30, 120]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SessionMinutes(u16);

impl SessionMinutes {
    /// Validate a duration in minutes
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when the value is outside `[30, 120]`.
    pub fn new(minutes: u16) -> AppResult<Self> {
        if (limits::MIN_DURATION_MINUTES..=limits::MAX_DURATION_MINUTES).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(AppError::out_of_range(format!(
                "Duration must be between {} and {} minutes, got {minutes}",
                limits::MIN_DURATION_MINUTES,
                limits::MAX_DURATION_MINUTES
            )))
        }
    }

    /// Clamp any value into the accepted range
    #[must_use]
    pub fn clamped(minutes: u16) -> Self {
        Self(minutes.clamp(limits::MIN_DURATION_MINUTES, limits::MAX_DURATION_MINUTES))
    }

    /// Minutes as a plain integer
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// One wizard step longer, saturating at the maximum
    #[must_use]
    pub fn increased(self) -> Self {
        Self::clamped(self.0.saturating_add(limits::DURATION_STEP_MINUTES))
    }

    /// One wizard step shorter, saturating at the minimum
    #[must_use]
    pub fn decreased(self) -> Self {
        Self::clamped(self.0.saturating_sub(limits::DURATION_STEP_MINUTES))
    }
}

impl Default for SessionMinutes {
    fn default() -> Self {
        Self(limits::DEFAULT_DURATION_MINUTES)
    }
}

impl TryFrom<u16> for SessionMinutes {
    type Error = AppError;

    fn try_from(value: u16) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<SessionMinutes> for u16 {
    fn from(value: SessionMinutes) -> Self {
        value.0
    }
}

impl Display for SessionMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutos", self.0)
    }
}

/// Complete structured selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    /// Training focus
    pub training_type: TrainingType,
    /// Player level
    pub difficulty: Difficulty,
    /// Session length
    pub duration: SessionMinutes,
    /// Solo or group
    pub group_size: TeamSize,
}

/// Structured selections while the wizard is still collecting them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDraft {
    /// Training focus, once chosen
    pub training_type: Option<TrainingType>,
    /// Player level, once chosen
    pub difficulty: Option<Difficulty>,
    /// Session length (always set, starts at the default)
    pub duration: SessionMinutes,
    /// Solo or group, once chosen
    pub group_size: Option<TeamSize>,
}

impl SelectionDraft {
    /// Turn the draft into complete selections
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` carrying the localized message when any
    /// selection is still missing.
    pub fn complete(&self) -> AppResult<Selections> {
        match (self.training_type, self.difficulty, self.group_size) {
            (Some(training_type), Some(difficulty), Some(group_size)) => Ok(Selections {
                training_type,
                difficulty,
                duration: self.duration,
                group_size,
            }),
            _ => Err(AppError::new(
                ErrorCode::MissingRequiredField,
                messages::INCOMPLETE_SELECTIONS,
            )),
        }
    }
}

/// Submitted training preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Preferences {
    /// Free-text description plus group size
    FreeText {
        /// What the user wants to work on
        description: String,
        /// How many players train
        group_size: GroupSize,
    },
    /// Explicit wizard selections
    Structured(Selections),
}

impl Preferences {
    /// Build free-text preferences
    #[must_use]
    pub fn free_text(description: impl Into<String>, group_size: GroupSize) -> Self {
        Self::FreeText {
            description: description.into(),
            group_size,
        }
    }

    /// Check that the preferences can be submitted
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with the localized "describe what you want to
    /// train" message when a free-text description is blank.
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::FreeText { description, .. } if description.trim().is_empty() => {
                Err(AppError::invalid_input(messages::EMPTY_DESCRIPTION))
            }
            Self::FreeText { .. } | Self::Structured(_) => Ok(()),
        }
    }
}

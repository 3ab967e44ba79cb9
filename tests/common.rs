// ABOUTME: Shared test utilities for football coach integration tests
// ABOUTME: Provides quiet logging, sample plans, and a scripted in-memory LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `football_coach`

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use football_coach::errors::AppError;
use football_coach::llm::{ChatRequest, ChatResponse, LlmProvider, TokenUsage};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Plain-layout plan used across tests
pub const PLAIN_PLAN: &str = "Entrenamiento de Fútbol Nivel Básico
Duración total: 40 minutos
1. Calentamiento (5 minutos)
Trote: Trote ligero alrededor del campo.
2. Entrenamiento principal (30 minutos)
Regate: Conducción de balón entre conos.
3. Enfriamiento (5 minutos)
Estiramiento: Estiramiento de piernas.";

/// Markdown/emoji-layout plan with two main exercises and detail bullets
pub const MARKDOWN_PLAN: &str = "**Entrenamiento de Técnica - Nivel Intermedio**
**Duración total: 60 minutos**

**1️⃣ Calentamiento (10 minutos)**
- **Movilidad articular**: Rotaciones de tobillo, rodilla y cadera.
- **Conducción suave**: Conducir el balón a ritmo bajo.

**2️⃣ Entrenamiento principal (40 minutos)**
- **Rondo 4v2**: Cuatro jugadores mantienen la posesión frente a dos.
- Material: 6 conos y 1 balón.
- **Pase y desmarque**: Pasar y moverse al espacio libre.
- Material: 4 conos.

**3️⃣ Vuelta a la calma (10 minutos)**
- **Estiramientos**: Estiramientos estáticos de 30 segundos.";

/// Minimal valid SVG
pub fn svg(label: &str) -> String {
    format!("<svg viewBox=\"0 0 400 250\"><text>{label}</text></svg>")
}

/// In-memory provider that replays scripted responses and records requests
#[derive(Default)]
pub struct FakeProvider {
    responses: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Provider whose responses are returned in order
    pub fn with_responses<I>(responses: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Result<String, AppError>>,
    {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Provider that always succeeds with `content` once
    pub fn replying(content: impl Into<String>) -> Arc<Self> {
        Self::with_responses([Ok(content.into())])
    }

    /// Provider that fails once with an upstream error
    pub fn failing() -> Arc<Self> {
        Self::with_responses([Err(AppError::external_service(
            "Gemini",
            "API error (500): internal",
        ))])
    }

    pub fn push_response(&self, response: Result<String, AppError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Prompt text of the last request
    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|r| r.messages.last())
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn display_name(&self) -> &'static str {
        "Fake Provider"
    }

    fn default_model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("FakeProvider has no scripted response")));

        next.map(|content| ChatResponse {
            usage: Some(TokenUsage {
                prompt_tokens: word_count(request),
                completion_tokens: word_count_of(&content),
                total_tokens: word_count(request) + word_count_of(&content),
            }),
            content,
            model: request
                .model
                .clone()
                .unwrap_or_else(|| "fake-model".to_owned()),
            finish_reason: Some("STOP".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Whitespace-separated words across all messages of a request
fn word_count(request: &ChatRequest) -> u32 {
    request
        .messages
        .iter()
        .map(|m| word_count_of(&m.content))
        .sum()
}

fn word_count_of(text: &str) -> u32 {
    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}

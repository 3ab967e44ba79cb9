// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Interactive structured wizard for the football coach CLI
// ABOUTME: Reads choices from stdin and drives the session through each step

use anyhow::Result;
use football_coach::config::CoachConfig;
use football_coach::export::{ExportFormat, Exporter};
use football_coach::session::{AppStep, CoachSession};
use football_coach_core::constants::messages;
use football_coach_core::models::{Difficulty, TeamSize, TrainingType};
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::helpers::display;
use crate::helpers::provider::build_provider;

type Input = Lines<BufReader<Stdin>>;

const INVALID_OPTION: &str = "Opción no válida.";

/// A parsed menu answer
#[derive(Debug, PartialEq, Eq)]
enum Choice<T> {
    Pick(T),
    Back,
    Quit,
    Invalid,
}

/// Run the structured flow until the user quits or stdin closes
pub async fn run(config: &CoachConfig) -> Result<()> {
    let provider = build_provider(config)?;
    let mut session = CoachSession::from_config(provider, config);
    let exporter = Exporter::new(&config.export_dir);
    let mut input = BufReader::new(io::stdin()).lines();

    eprintln!("⚽ Entrenador de fútbol IA");
    display::display_hint("número para elegir, b para volver, q para salir");

    loop {
        match session.step() {
            AppStep::Start => session.start_structured(),
            AppStep::TrainingType => {
                display::display_options("Tipo de entrenamiento", &TrainingType::ALL);
                match parse_choice(&read_line(&mut input).await?, &TrainingType::ALL) {
                    Choice::Pick(training_type) => session.choose_training_type(training_type),
                    Choice::Back => session.back(),
                    Choice::Quit => return Ok(()),
                    Choice::Invalid => display::display_error(INVALID_OPTION),
                }
            }
            AppStep::Difficulty => {
                display::display_options("Nivel de dificultad", &Difficulty::ALL);
                match parse_choice(&read_line(&mut input).await?, &Difficulty::ALL) {
                    Choice::Pick(difficulty) => session.choose_difficulty(difficulty),
                    Choice::Back => session.back(),
                    Choice::Quit => return Ok(()),
                    Choice::Invalid => display::display_error(INVALID_OPTION),
                }
            }
            AppStep::Duration => {
                if !duration_step(&mut session, &mut input).await? {
                    return Ok(());
                }
            }
            AppStep::GroupSize => {
                display::display_options("Tamaño del grupo", &TeamSize::ALL);
                match parse_choice(&read_line(&mut input).await?, &TeamSize::ALL) {
                    Choice::Pick(team_size) => {
                        session.choose_team_size(team_size);
                        generate(&mut session).await;
                    }
                    Choice::Back => session.back(),
                    Choice::Quit => return Ok(()),
                    Choice::Invalid => display::display_error(INVALID_OPTION),
                }
            }
            AppStep::Generating | AppStep::Plan => {
                if !plan_step(&mut session, &exporter, &mut input).await? {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns `false` when the user quits
async fn duration_step(session: &mut CoachSession, input: &mut Input) -> Result<bool> {
    eprintln!("\nDuración: {}", session.draft().duration);
    display::display_hint("+ / - para ajustar, un número de minutos, Enter para confirmar");

    match read_line(input).await?.trim() {
        "" => session.confirm_duration(),
        "+" => {
            session.increase_duration();
        }
        "-" => {
            session.decrease_duration();
        }
        "b" => session.back(),
        "q" => return Ok(false),
        other => match other.parse::<u16>() {
            Ok(minutes) => {
                if let Err(e) = session.set_duration(minutes) {
                    display::display_error(&e.message);
                }
            }
            Err(_) => display::display_error(INVALID_OPTION),
        },
    }
    Ok(true)
}

async fn generate(session: &mut CoachSession) {
    display::display_status(messages::GENERATING_PLAN);
    display::display_status(messages::GENERATING_PLAN_DETAIL);
    if session.generate_plan().await.is_err() {
        if let Some(message) = session.error() {
            display::display_error(message);
        }
        return;
    }
    if let Some(plan) = session.parsed_plan() {
        display::display_plan(&plan);
    }
}

/// Returns `false` when the user quits
async fn plan_step(
    session: &mut CoachSession,
    exporter: &Exporter,
    input: &mut Input,
) -> Result<bool> {
    eprintln!();
    if session.can_generate_diagrams() {
        display::display_hint("d: generar diagramas");
    }
    display::display_hint("e <html|svg|png|pdf|json>: exportar, n: nuevo plan, q: salir");

    let line = read_line(input).await?;
    let mut words = line.split_whitespace();
    match words.next() {
        Some("d") => {
            display::display_status(messages::GENERATING_DIAGRAMS);
            if session.generate_diagrams().await.is_err() {
                if let Some(message) = session.error() {
                    display::display_error(message);
                }
            } else if let (Some(plan), Some(diagrams)) = (session.parsed_plan(), session.diagrams())
            {
                display::display_plan(&plan);
                display::display_diagram_summary(diagrams, &plan);
            }
        }
        Some("e") => match words.next().unwrap_or("pdf").parse::<ExportFormat>() {
            Ok(format) => {
                if let Some(plan) = session.parsed_plan() {
                    let path = exporter.export(&plan, format).await;
                    display::display_export_result(format, path.as_deref());
                }
            }
            Err(e) => display::display_error(&e.message),
        },
        Some("n") => session.reset(),
        Some("q") => return Ok(false),
        _ => display::display_error(INVALID_OPTION),
    }
    Ok(true)
}

/// Next stdin line; a closed stdin reads as "q"
async fn read_line(input: &mut Input) -> Result<String> {
    eprint!("> ");
    Ok(input.next_line().await?.unwrap_or_else(|| "q".to_owned()))
}

fn parse_choice<T: Copy>(line: &str, options: &[T]) -> Choice<T> {
    match line.trim().to_lowercase().as_str() {
        "q" | "salir" => Choice::Quit,
        "b" | "atras" | "atrás" => Choice::Back,
        other => other
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| options.get(index).copied())
            .map_or(Choice::Invalid, Choice::Pick),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_is_one_based() {
        assert_eq!(
            parse_choice("1", &TrainingType::ALL),
            Choice::Pick(TrainingType::Tecnica)
        );
        assert_eq!(
            parse_choice(" 3 ", &Difficulty::ALL),
            Choice::Pick(Difficulty::Avanzado)
        );
    }

    #[test]
    fn test_parse_choice_rejects_out_of_range() {
        assert_eq!(parse_choice("0", &TeamSize::ALL), Choice::Invalid);
        assert_eq!(parse_choice("3", &TeamSize::ALL), Choice::Invalid);
        assert_eq!(parse_choice("abc", &TeamSize::ALL), Choice::Invalid);
    }

    #[test]
    fn test_parse_choice_navigation() {
        assert_eq!(parse_choice("b", &TeamSize::ALL), Choice::Back);
        assert_eq!(parse_choice("Q", &TeamSize::ALL), Choice::Quit);
    }
}

//! `gapmap assess`: interactive assessment loop over stdin/stdout.
//!
//! All transition rules live in [`AssessmentSession`]; this module only
//! parses input lines and renders prompts.

use crate::catalog::Catalog;
use crate::core::{function_label, Answer};
use crate::flow::{Advance, AssessmentSession, FlowError, FlowState};
use crate::io::output::{create_writer, create_writer_to, OutputFormat};
use anyhow::Context;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub struct AssessConfig {
    pub catalog: PathBuf,
    pub session: Option<PathBuf>,
    pub save_session: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub require_consent: bool,
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum InputCommand {
    Answer(Answer),
    Next,
    Previous,
    Jump(i64),
    Review,
    BackToAssess,
    BackToReview,
    Restart,
    Save,
    Quit,
    Help,
    Unknown,
}

fn parse_command(line: &str) -> InputCommand {
    let trimmed = line.trim();
    if let Some(answer) = Answer::parse(trimmed) {
        return InputCommand::Answer(answer);
    }
    if let Some(rest) = trimmed.strip_prefix("j ") {
        return match rest.trim().parse::<i64>() {
            // 1-based on the prompt, 0-based internally
            Ok(n) => InputCommand::Jump(n - 1),
            Err(_) => InputCommand::Unknown,
        };
    }
    match trimmed {
        "" | "n" | "next" => InputCommand::Next,
        "p" | "prev" => InputCommand::Previous,
        "r" | "review" => InputCommand::Review,
        "a" | "assess" => InputCommand::BackToAssess,
        "b" | "back" => InputCommand::BackToReview,
        "restart" => InputCommand::Restart,
        "s" | "save" => InputCommand::Save,
        "q" | "quit" => InputCommand::Quit,
        "h" | "help" | "?" => InputCommand::Help,
        _ => InputCommand::Unknown,
    }
}

pub fn run(config: AssessConfig) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog)?;
    let data_file = config.catalog.display().to_string();
    let mut session = if config.require_consent {
        AssessmentSession::with_consent_gate(catalog)
    } else {
        AssessmentSession::new(catalog)
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if let Some(path) = &config.session {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read session file {}", path.display()))?;
        let imported = session.import(&json)?;
        println!(
            "Resumed session: {} answers restored, {} dropped.",
            imported.answers.len(),
            imported.dropped
        );
    } else {
        println!("Assessment over {} questions.", session.catalog().len());
        if config.require_consent {
            println!("This self-assessment is informational only. Type 'yes' to continue.");
            if next_line(&mut lines)?.trim().eq_ignore_ascii_case("yes") {
                session.give_consent();
            } else {
                println!("Consent not given; exiting.");
                return Ok(());
            }
        }
        session.start()?;
    }

    loop {
        match session.state() {
            FlowState::Assessing => show_question(&session),
            FlowState::Reviewing => {
                print_review(&session, config.format)?;
                println!("[a]ssess more, [s]ave, [q]uit");
            }
            FlowState::Intro => break,
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };

        match parse_command(&line?) {
            InputCommand::Answer(answer) => match session.answer(answer) {
                Ok(()) => println!("recorded {}", answer.label()),
                Err(e) => println!("{e}"),
            },
            InputCommand::Next => match session.next() {
                Ok(Advance::Question(_)) => {}
                Ok(Advance::Review(_)) => {}
                Err(FlowError::Unanswered) => {
                    println!("answer first (1-5 or na), or jump with 'j <n>'")
                }
                Err(e) => println!("{e}"),
            },
            InputCommand::Previous => {
                if let Err(e) = session.previous() {
                    println!("{e}");
                }
            }
            InputCommand::Jump(index) => {
                session.jump_to(index);
            }
            InputCommand::Review => {
                if let Err(e) = session.open_review() {
                    println!("{e}");
                }
            }
            InputCommand::BackToAssess => {
                if let Err(e) = session.back_to_assess() {
                    println!("{e}");
                }
            }
            InputCommand::BackToReview => {
                if let Err(e) = session.back_to_review() {
                    println!("{e}");
                }
            }
            InputCommand::Restart => {
                session.restart();
                if config.require_consent {
                    session.give_consent();
                }
                session.start()?;
            }
            InputCommand::Save => save_session(&session, &config, &data_file)?,
            InputCommand::Quit => break,
            InputCommand::Help => print_help(),
            InputCommand::Unknown => print_help(),
        }
    }

    if config.save_session.is_some() {
        save_session(&session, &config, &data_file)?;
    }
    if session.has_any_answer() {
        write_final_report(&session, &config)?;
    }
    Ok(())
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> anyhow::Result<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Ok(String::new()),
    }
}

fn show_question(session: &AssessmentSession) {
    let Some(q) = session.current_question() else {
        return;
    };
    let tag = q.function_tag();
    println!();
    println!(
        "[{}/{}] {} | {} ({}) | {}",
        session.current_index() + 1,
        session.catalog().len(),
        q.id,
        function_label(tag),
        tag,
        q.display_label()
    );
    println!("{}", q.question);
    for example in &q.examples {
        match (&example.code, &example.text) {
            (Some(code), Some(text)) => println!("  e.g. {code}: {text}"),
            (Some(code), None) => println!("  e.g. {code}"),
            (None, Some(text)) => println!("  e.g. {text}"),
            (None, None) => {}
        }
    }
    let current = session
        .answers()
        .get(&q.id)
        .map(|a| a.label())
        .unwrap_or("-");
    println!("current: {current} | 1-5, na, [n]ext, [p]rev, [r]eview, [h]elp");
}

fn print_review(session: &AssessmentSession, format: OutputFormat) -> anyhow::Result<()> {
    let report = session.report();
    create_writer(format).write_report(&report)?;
    Ok(())
}

fn print_help() {
    println!("1-5      score the current question");
    println!("na       mark as not assessed");
    println!("n/enter  next question (opens review after the last one)");
    println!("p        previous question");
    println!("j <n>    jump to question n");
    println!("r        open the review (needs at least one answer)");
    println!("a        back to assessing (from review)");
    println!("b        back to review (after arriving from review)");
    println!("restart  clear all answers and start over");
    println!("s        save the session snapshot");
    println!("q        quit");
}

fn save_session(
    session: &AssessmentSession,
    config: &AssessConfig,
    data_file: &str,
) -> anyhow::Result<()> {
    let Some(path) = &config.save_session else {
        println!("no --save-session path configured");
        return Ok(());
    };
    let document = session.export_session(data_file);
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write session file {}", path.display()))?;
    println!("session saved to {}", path.display());
    Ok(())
}

fn write_final_report(session: &AssessmentSession, config: &AssessConfig) -> anyhow::Result<()> {
    let report = session.report();
    match &config.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            create_writer_to(config.format, file).write_report(&report)?;
            println!("report written to {}", path.display());
        }
        None => create_writer(config.format).write_report(&report)?,
    }
    Ok(())
}

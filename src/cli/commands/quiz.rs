//! Quiz command handler
//!
//! Runs a quiz session from a question bank file, either scripted
//! (`--answers`) for non-interactive use or interactively over stdin with a
//! live elapsed-time counter.

use super::resolve_content_path;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use study_path::config::Config;
use study_path::errors::QuizError;
use study_path::loader;
use study_path::session::{QuizSession, RevisitPolicy, ScoreReport};
use study_path::timer::Ticker;
use study_path::{error, info};

/// Run the quiz command.
///
/// # Arguments
/// * `bank_path` - Path to the question bank TOML file
/// * `answers` - Scripted option indices; interactive when `None`
/// * `lock_answers` - Keep submitted answers final on revisit
/// * `config` - Configuration providing the content directory
pub fn run(bank_path: &Path, answers: Option<&[usize]>, lock_answers: bool, config: &Config) {
    let path = resolve_content_path(bank_path, config);
    let bank = match loader::load_question_bank(&path) {
        Ok(bank) => bank,
        Err(e) => {
            error!("Failed to load question bank {}: {e}", path.display());
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Question bank loaded: {} ({} questions)",
        path.display(),
        bank.len()
    );

    let policy = if lock_answers {
        RevisitPolicy::Preserve
    } else {
        RevisitPolicy::Relock
    };

    println!("\n=== {} ===", bank.topic);
    println!("{} questions\n", bank.len());

    let outcome = answers.map_or_else(
        || run_interactive(QuizSession::with_policy(bank.clone(), policy)),
        |list| run_scripted(QuizSession::with_policy(bank.clone(), policy), list),
    );

    if let Err(e) = outcome {
        error!("Quiz session failed: {e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Drive a session from a fixed answer list; unanswered questions are skipped
fn run_scripted(mut session: QuizSession, answers: &[usize]) -> Result<(), QuizError> {
    session.start()?;

    let total = session.bank().len();
    for index in 0..total {
        let question = session.current_question().clone();

        if let Some(&answer) = answers.get(index) {
            session.select_option(answer)?;
            let correct = session.submit_answer()?;
            if correct {
                println!("✓ Q{}: {}", index + 1, question.prompt);
            } else {
                println!("✗ Q{}: {}", index + 1, question.prompt);
                println!(
                    "  Correct answer: {}",
                    question.options[question.correct_option]
                );
            }
        } else {
            println!("- Q{}: {} (skipped)", index + 1, question.prompt);
        }

        session.next()?;
    }

    print_summary(&session);
    Ok(())
}

/// Drive a session from stdin, with a 1 Hz ticker feeding the elapsed counter
fn run_interactive(session: QuizSession) -> Result<(), QuizError> {
    let session = Arc::new(Mutex::new(session));
    if let Ok(mut guard) = session.lock() {
        guard.start()?;
    }

    // Ticker cancels on drop, so completion or an early return stops it
    let ticker_session = Arc::clone(&session);
    let _ticker = Ticker::every_second(move || {
        if let Ok(mut guard) = ticker_session.lock() {
            guard.tick();
        }
    });

    loop {
        let (prompt, options, number, total) = {
            let Ok(guard) = session.lock() else { break };
            if guard.is_completed() {
                break;
            }
            let question = guard.current_question();
            (
                question.prompt.clone(),
                question.options.clone(),
                guard.current_index() + 1,
                guard.bank().len(),
            )
        };

        println!("Question {number} of {total}: {prompt}");
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        print!("Answer [1-{}], (s)kip, (q)uit: ", options.len());
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            break;
        }
        let input = line.trim();

        let Ok(mut guard) = session.lock() else { break };
        match input {
            "q" | "quit" => break,
            "" | "s" | "skip" => {
                if let Err(e) = guard.next() {
                    eprintln!("✗ {e}");
                }
                println!();
            }
            _ => match input.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    guard.select_option(n - 1)?;
                    let correct = guard.submit_answer()?;
                    let question = guard.current_question();
                    if correct {
                        println!("Correct!");
                    } else {
                        println!(
                            "Incorrect. Correct answer: {}",
                            question.options[question.correct_option]
                        );
                    }
                    if !question.explanation.is_empty() {
                        println!("{}", question.explanation);
                    }
                    println!();
                    guard.next()?;
                }
                _ => {
                    eprintln!("✗ Enter a number between 1 and {}", options.len());
                }
            },
        }
    }

    // Stop counting before the summary is printed
    if let Ok(mut guard) = session.lock() {
        guard.pause();
        print_summary(&guard);
    }
    Ok(())
}

/// Print the final (or partial, on quit) score and elapsed time
fn print_summary(session: &QuizSession) {
    let ScoreReport { correct, total } = session.score();
    println!("\n=== Results ===");
    println!("Score: {correct}/{total}");
    println!("Time: {}", session.format_elapsed());
}

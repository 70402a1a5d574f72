//! The `kinexam start` command: the interactive exam flow.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use kinexam_core::questions::QUESTION_COUNT;
use kinexam_core::session::{ExamPhase, ExamSession};

pub fn execute(output: PathBuf) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run(&mut input, &output)
}

/// Drive a full exam session over line-based input.
///
/// Validation errors re-prompt without touching session state. Input
/// ending early (EOF) mid-exam finalizes over whatever answers were
/// collected.
fn run(input: &mut impl BufRead, output: &Path) -> Result<()> {
    let mut session = ExamSession::new();

    println!("Welcome to the physics exam!");

    while session.phase() == ExamPhase::NotStarted {
        let Some(name) = prompt(input, "Please enter your full name: ")? else {
            anyhow::bail!("input ended before the exam started");
        };
        let Some(seed) = prompt(input, "Enter your seed number (a POSITIVE integer): ")? else {
            anyhow::bail!("input ended before the exam started");
        };
        match session.begin(&name, &seed) {
            Ok(()) => {}
            Err(e) if e.is_input_error() => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nHello, {}!", session.student());
    println!("Exam seed: {}", session.seed());

    loop {
        let Some((number, text)) = session
            .current_question()
            .map(|q| (q.number, q.text.clone()))
        else {
            break;
        };

        println!("\nQuestion {number} of {QUESTION_COUNT}:");
        println!("{text}");

        match prompt(input, "Your answer (e.g. 1.00): ")? {
            Some(answer) => {
                session.submit_answer(&answer)?;
            }
            None => {
                // Input ran out mid-exam: grade what we have.
                session.finish_early()?;
                break;
            }
        }
    }

    println!("\nThank you for completing the exam, {}!", session.student());

    match session.finished() {
        Some(finished) => {
            let path = output.join(&finished.filename);
            fs::write(&path, &finished.sealed.blob)
                .with_context(|| format!("failed to write grade file to {}", path.display()))?;
            println!("Your grade file was written to {}.", path.display());
            println!("Please send it to your instructor.");
        }
        None => {
            println!("The grade file could not be generated. Please contact your instructor.");
        }
    }

    Ok(())
}

fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

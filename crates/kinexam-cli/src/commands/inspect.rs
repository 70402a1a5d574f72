//! The `kinexam inspect` command: decoded per-question detail.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use kinexam_core::record::verify_blob;

pub fn execute(record_path: PathBuf) -> Result<()> {
    let blob = fs::read_to_string(&record_path)
        .with_context(|| format!("failed to read grade file: {}", record_path.display()))?;
    let verification = verify_blob(&blob)
        .with_context(|| format!("failed to decode grade file: {}", record_path.display()))?;

    let record = &verification.record;
    println!("Student: {} (seed {})", record.student, record.seed);
    println!("Taken:   {}", record.completed_at);
    println!("Session: {}", record.session_id);

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Submitted", "Expected", "Correct"]);

    for (i, answer) in record.answers.iter().enumerate() {
        let expected = answer
            .expected
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&answer.question),
            Cell::new(&answer.submitted),
            Cell::new(expected),
            Cell::new(if answer.correct { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
    println!(
        "Score: {} / {} gradable ({} presented)",
        record.score, record.questions_gradable, record.questions_presented
    );
    println!(
        "Integrity: {}",
        if verification.is_intact() {
            "intact"
        } else {
            "TAMPERED"
        }
    );

    Ok(())
}

//! The `kinexam verify` command: instructor-side integrity check.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use kinexam_core::record::verify_blob;

pub fn execute(record_path: PathBuf) -> Result<()> {
    let blob = fs::read_to_string(&record_path)
        .with_context(|| format!("failed to read grade file: {}", record_path.display()))?;
    let verification = verify_blob(&blob)
        .with_context(|| format!("failed to decode grade file: {}", record_path.display()))?;

    let record = &verification.record;
    println!("Student: {}", record.student);
    println!("Seed:    {}", record.seed);
    println!(
        "Score:   {} / {} gradable ({} presented)",
        record.score, record.questions_gradable, record.questions_presented
    );
    println!("Taken:   {}", record.completed_at);

    if verification.is_intact() {
        println!("\nIntegrity check PASSED ({})", verification.stored_digest);
    } else {
        println!("\nIntegrity check FAILED");
        println!("  stored:     {}", verification.stored_digest);
        println!("  recomputed: {}", verification.computed_digest);
        std::process::exit(1);
    }

    Ok(())
}

//! Tolerance grading of submitted answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::answers::round2;
use crate::questions::Question;

/// Maximum absolute difference between a rounded submission and the
/// reference answer for the submission to count as correct.
pub const TOLERANCE: f64 = 0.05;

/// Raw text a student entered for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    /// 0-based index of the question this answers.
    pub question_index: usize,
    /// The text exactly as entered.
    pub text: String,
}

/// Per-question grading detail carried into the exam record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingRecord {
    /// Rendered question text.
    pub question: String,
    /// The student's submission, verbatim.
    pub submitted: String,
    /// Reference answer, or `None` when it was undefined for this seed.
    pub expected: Option<f64>,
    /// Whether the submission graded as correct.
    pub correct: bool,
}

/// Outcome of grading one exam.
#[derive(Debug, Clone)]
pub struct GradingOutcome {
    /// One record per answered question, in question order.
    pub records: Vec<GradingRecord>,
    /// Count of correct answers.
    pub score: u32,
    /// Questions the exam presented (always the full set).
    pub questions_presented: u32,
    /// Answered questions whose reference answer was defined.
    pub questions_gradable: u32,
}

/// Check one submission against a reference answer.
///
/// Parse failure is a normal grading outcome (incorrect), not an error.
/// An undefined reference answer is never correct.
pub fn check_answer(submitted: &str, expected: Option<f64>) -> bool {
    let Some(expected) = expected else {
        return false;
    };
    let Ok(value) = submitted.trim().parse::<f64>() else {
        return false;
    };
    match round2(value) {
        Some(rounded) => (rounded - expected).abs() <= TOLERANCE,
        None => false,
    }
}

/// Grade all recorded submissions against the reference answers.
///
/// When the same question index was submitted more than once, the last
/// submission wins. Records come out in ascending question order, one per
/// answered question, so an interrupted exam grades exactly the answers it
/// collected.
pub fn grade(
    questions: &[Question],
    submissions: &[SubmittedAnswer],
    reference: &[Option<f64>],
) -> GradingOutcome {
    let graded_range = questions.len().min(reference.len());
    let mut latest: BTreeMap<usize, &SubmittedAnswer> = BTreeMap::new();
    for submission in submissions {
        if submission.question_index < graded_range {
            latest.insert(submission.question_index, submission);
        }
    }

    let mut records = Vec::with_capacity(latest.len());
    let mut score = 0u32;
    let mut gradable = 0u32;

    for (&index, submission) in &latest {
        let expected = reference[index];
        if expected.is_some() {
            gradable += 1;
        }
        let correct = check_answer(&submission.text, expected);
        if correct {
            score += 1;
        }
        records.push(GradingRecord {
            question: questions[index].text.clone(),
            submitted: submission.text.clone(),
            expected,
            correct,
        });
    }

    GradingOutcome {
        records,
        score,
        questions_presented: questions.len() as u32,
        questions_gradable: gradable,
    }
}

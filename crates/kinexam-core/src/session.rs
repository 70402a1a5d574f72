//! Exam session state machine.
//!
//! `NotStarted -> InProgress -> Finished`, one student per session. The
//! session owns every piece of mutable exam state (name, seed, question
//! index, collected answers) and is passed explicitly to whatever front
//! end drives it; there are no ambient globals.

use chrono::Utc;
use uuid::Uuid;

use crate::answers::reference_answers;
use crate::error::SessionError;
use crate::grading::{grade, SubmittedAnswer};
use crate::questions::{question_set, Question, QUESTION_COUNT};
use crate::record::{ExamRecord, SealedRecord};

/// Where the session is in the exam flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    NotStarted,
    InProgress,
    Finished,
}

/// Artifact of a finished exam.
#[derive(Debug, Clone)]
pub struct FinishedExam {
    /// The record that was sealed.
    pub record: ExamRecord,
    /// The sealed blob and its digest.
    pub sealed: SealedRecord,
    /// Suggested download filename.
    pub filename: String,
}

/// One student's exam from first prompt to sealed record.
#[derive(Debug)]
pub struct ExamSession {
    phase: ExamPhase,
    session_id: Uuid,
    student: String,
    seed: u32,
    questions: Vec<Question>,
    reference: [Option<f64>; QUESTION_COUNT],
    submissions: Vec<SubmittedAnswer>,
    current: usize,
    finished: Option<FinishedExam>,
}

impl ExamSession {
    pub fn new() -> Self {
        Self {
            phase: ExamPhase::NotStarted,
            session_id: Uuid::new_v4(),
            student: String::new(),
            seed: 0,
            questions: Vec::new(),
            reference: [None; QUESTION_COUNT],
            submissions: Vec::new(),
            current: 0,
            finished: None,
        }
    }

    pub fn phase(&self) -> ExamPhase {
        self.phase
    }

    pub fn student(&self) -> &str {
        &self.student
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Validate the start inputs and move to `InProgress`.
    ///
    /// Rejection leaves the session in `NotStarted`, untouched, so the
    /// caller can re-prompt.
    pub fn begin(&mut self, name: &str, seed_text: &str) -> Result<(), SessionError> {
        if self.phase != ExamPhase::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let parsed: i64 = seed_text
            .trim()
            .parse()
            .map_err(|_| SessionError::SeedNotAnInteger(seed_text.trim().to_string()))?;
        if parsed <= 0 {
            return Err(SessionError::SeedNotPositive(parsed));
        }
        let seed = u32::try_from(parsed).map_err(|_| SessionError::SeedOutOfRange(parsed))?;

        self.student = name.to_string();
        self.seed = seed;
        self.questions = question_set(seed);
        self.reference = reference_answers(f64::from(seed));
        self.current = 0;
        self.phase = ExamPhase::InProgress;
        tracing::info!(student = %self.student, seed, "exam started");
        Ok(())
    }

    /// The question awaiting an answer, if the exam is in progress.
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == ExamPhase::InProgress {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    /// Record the submission for the current question and advance.
    ///
    /// Answering the final question grades and seals in the same call;
    /// there is no observable state between the last answer and
    /// `Finished`.
    pub fn submit_answer(&mut self, text: &str) -> Result<ExamPhase, SessionError> {
        if self.phase != ExamPhase::InProgress {
            return Err(SessionError::NotInProgress);
        }
        self.submissions.push(SubmittedAnswer {
            question_index: self.current,
            text: text.to_string(),
        });
        self.current += 1;
        if self.current >= self.questions.len() {
            self.finish();
        }
        Ok(self.phase)
    }

    /// Force grading over the submissions collected so far.
    ///
    /// For interrupted sessions: the record then counts exactly the
    /// questions that were answered.
    pub fn finish_early(&mut self) -> Result<(), SessionError> {
        if self.phase != ExamPhase::InProgress {
            return Err(SessionError::NotInProgress);
        }
        self.finish();
        Ok(())
    }

    /// The sealed artifact, present once the exam finished and sealing
    /// succeeded. `None` after `Finished` means the artifact is missing
    /// and the student should be told to contact the instructor.
    pub fn finished(&self) -> Option<&FinishedExam> {
        self.finished.as_ref()
    }

    fn finish(&mut self) {
        let outcome = grade(&self.questions, &self.submissions, &self.reference);
        let record = ExamRecord {
            student: self.student.clone(),
            seed: self.seed,
            score: outcome.score,
            questions_presented: outcome.questions_presented,
            questions_gradable: outcome.questions_gradable,
            completed_at: Utc::now(),
            session_id: self.session_id,
            answers: outcome.records,
        };
        match record.seal() {
            Ok(sealed) => {
                let filename = record.filename();
                tracing::info!(score = record.score, %filename, "exam sealed");
                self.finished = Some(FinishedExam {
                    record,
                    sealed,
                    filename,
                });
            }
            Err(e) => {
                // Finished with no artifact; the front end warns the student.
                tracing::error!("failed to seal exam record: {e}");
            }
        }
        self.phase = ExamPhase::Finished;
    }
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new()
    }
}

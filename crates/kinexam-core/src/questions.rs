//! The fixed ten-question kinematics set.
//!
//! The templates are a constant table, not derived data: every exam asks
//! these ten questions, with the student's seed substituted into each one.

/// Number of questions in every exam.
pub const QUESTION_COUNT: usize = 10;

/// One rendered exam question.
#[derive(Debug, Clone)]
pub struct Question {
    /// 1-based ordinal shown to the student.
    pub number: usize,
    /// Fully rendered question text.
    pub text: String,
}

/// Render the question set for a seed.
pub fn question_set(seed: u32) -> Vec<Question> {
    let texts = [
        format!("An object is dropped from {seed} m. Find its fall time in s. (2 decimals)"),
        format!("An object is dropped from {seed} m. Find its final speed in m/s. (2 decimals)"),
        format!(
            "An object is thrown upward with a speed of {seed} m/s. \
             Find its rise time in s. (2 decimals)"
        ),
        format!(
            "An object is thrown upward with a speed of {seed} m/s. \
             Find its total flight time in s. (2 decimals)"
        ),
        format!(
            "An object is thrown upward with a speed of {seed} m/s. \
             Find the magnitude of its speed when it returns to the launch point. (2 decimals)"
        ),
        format!(
            "An object is thrown downward at {seed} m/s from a height of 100 m. \
             Find its final speed in m/s. (2 decimals)"
        ),
        format!(
            "An object is thrown downward at {seed} m/s from a height of 100 m. \
             Find its fall time in s. (2 decimals)"
        ),
        format!(
            "An object is dropped and falls for {seed} s. \
             Find the height in m it was dropped from. (2 decimals)"
        ),
        format!(
            "An object falls from a height of {seed} m. \
             Find the time in s to fall the first half of the drop. (2 decimals)"
        ),
        format!(
            "An object falls from a height of {seed} m. \
             Find the time in s to fall the second half of the drop."
        ),
    ];

    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| Question { number: i + 1, text })
        .collect()
}

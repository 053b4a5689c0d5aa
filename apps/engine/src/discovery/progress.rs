//! Form progress and the pain/closing doughnut scores. Presentational only;
//! the recommendation engine never reads these.

use serde::{Deserialize, Serialize};

use crate::models::form::{FormState, MAX_QUESTION_SCORE, PAIN_SLICE_LEN, SPIN_QUESTIONS};

/// Doughnut percentages for the two halves of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallScores {
    pub pain_pct: u8,
    pub closing_pct: u8,
}

/// Share of answered questions, rounded to a whole percentage. "Answered"
/// means a non-blank trimmed value.
pub fn completion_percent(form: &FormState) -> u8 {
    let total = SPIN_QUESTIONS.len();
    let filled = (0..total).filter(|&i| form.answered(i)).count();
    ((filled as f64 / total as f64) * 100.0).round() as u8
}

/// Sums the answer scores over the two fixed slices of the question list
/// (first four vs the rest) and normalizes each against the 20-point slice
/// maximum.
pub fn call_scores(form: &FormState) -> CallScores {
    let scores = form.answer_scores();
    let pain_sum: u32 = scores[..PAIN_SLICE_LEN].iter().map(|&s| u32::from(s)).sum();
    let closing_sum: u32 = scores[PAIN_SLICE_LEN..].iter().map(|&s| u32::from(s)).sum();

    let slice_max = (PAIN_SLICE_LEN as u32) * u32::from(MAX_QUESTION_SCORE);
    let pct = |sum: u32| {
        ((f64::from(sum) / f64::from(slice_max)) * 100.0)
            .round()
            .min(100.0) as u8
    };

    CallScores {
        pain_pct: pct(pain_sum),
        closing_pct: pct(closing_sum),
    }
}

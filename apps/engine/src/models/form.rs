//! Form-facing data model: the raw field map the UI host pushes into the
//! engine, the scripted SPIN question set, and the live answer state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Select-field value that redirects to the free-text companion input.
pub const OTHER_SENTINEL: &str = "altro";

/// Number of leading questions that feed the pain score; the remaining
/// questions feed the closing score.
pub const PAIN_SLICE_LEN: usize = 4;

/// Per-answer score ceiling.
pub const MAX_QUESTION_SCORE: u8 = 5;

/// The four phases of a SPIN discovery call, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPhase {
    Situazione,
    Problema,
    Implicazione,
    Convenienza,
}

/// One scripted discovery question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpinQuestion {
    pub id: &'static str,
    pub phase: SpinPhase,
    pub prompt: &'static str,
}

/// The scripted question set: two questions per phase, asked in phase order.
pub const SPIN_QUESTIONS: [SpinQuestion; 8] = [
    SpinQuestion {
        id: "spinS1",
        phase: SpinPhase::Situazione,
        prompt: "Come gestite oggi le prenotazioni dei pazienti?",
    },
    SpinQuestion {
        id: "spinS2",
        phase: SpinPhase::Situazione,
        prompt: "Quante persone lavorano in segreteria e con quali strumenti?",
    },
    SpinQuestion {
        id: "spinP1",
        phase: SpinPhase::Problema,
        prompt: "Quali difficoltà incontrate con il processo attuale?",
    },
    SpinQuestion {
        id: "spinP2",
        phase: SpinPhase::Problema,
        prompt: "Con che frequenza si verificano no-show o doppie prenotazioni?",
    },
    SpinQuestion {
        id: "spinI1",
        phase: SpinPhase::Implicazione,
        prompt: "Che impatto hanno questi problemi sui ricavi dello studio?",
    },
    SpinQuestion {
        id: "spinI2",
        phase: SpinPhase::Implicazione,
        prompt: "Quanto tempo dedica il personale a rimediare agli errori di agenda?",
    },
    SpinQuestion {
        id: "spinN1",
        phase: SpinPhase::Convenienza,
        prompt: "Quanto sarebbe utile ridurre i no-show in modo automatico?",
    },
    SpinQuestion {
        id: "spinN2",
        phase: SpinPhase::Convenienza,
        prompt: "Che valore avrebbe liberare ore di segreteria ogni settimana?",
    },
];

/// A select-field value with the "altro" escape hatch already resolved.
/// Resolution happens once, at construction; downstream matching never sees
/// the sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// One of the predefined options.
    Known(String),
    /// The free-text companion value behind the "altro" option.
    Other(String),
}

impl Selection {
    /// Builds a selection from a select value and its companion free-text
    /// field. The sentinel comparison ignores case and surrounding space.
    pub fn from_raw(selected: &str, other: &str) -> Self {
        if selected.trim().eq_ignore_ascii_case(OTHER_SENTINEL) {
            Selection::Other(other.trim().to_string())
        } else {
            Selection::Known(selected.trim().to_string())
        }
    }

    /// Normalized form used by tag matching: trimmed and lowercased.
    pub fn resolved(&self) -> String {
        match self {
            Selection::Known(v) | Selection::Other(v) => v.trim().to_lowercase(),
        }
    }

    /// Display form, before normalization.
    pub fn raw(&self) -> &str {
        match self {
            Selection::Known(v) | Selection::Other(v) => v,
        }
    }
}

/// Raw key-value form fields as the UI host reports them. Keys are the
/// field ids the host page uses ("facilityType", "staffCount", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData(HashMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        FormData(HashMap::new())
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    /// Field value, or the empty string when the field was never set.
    pub fn value(&self, id: &str) -> &str {
        self.0.get(id).map(String::as_str).unwrap_or("")
    }

    /// Resolves a select field together with its `{id}Other` companion.
    pub fn selection(&self, id: &str) -> Selection {
        let other_id = format!("{id}Other");
        Selection::from_raw(self.value(id), self.value(&other_id))
    }
}

/// Live, in-memory state of the discovery form: the strategic context, the
/// eight SPIN answers with their scores, and every other raw field. Answer
/// and score vectors always match the question count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub strategic_context: String,
    answers: Vec<String>,
    answer_scores: Vec<u8>,
    pub fields: FormData,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            strategic_context: String::new(),
            answers: vec![String::new(); SPIN_QUESTIONS.len()],
            answer_scores: vec![0; SPIN_QUESTIONS.len()],
            fields: FormData::new(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer. Out-of-range indexes are ignored. The score
    /// defaults to the ceiling for a non-blank answer and zero otherwise;
    /// hosts with rated options override via `set_answer_score`.
    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) {
        if index >= self.answers.len() {
            return;
        }
        let text = text.into();
        self.answer_scores[index] = if text.trim().is_empty() {
            0
        } else {
            MAX_QUESTION_SCORE
        };
        self.answers[index] = text;
    }

    /// Overrides the score attached to one answer, clamped to the ceiling.
    pub fn set_answer_score(&mut self, index: usize, score: u8) {
        if index >= self.answer_scores.len() {
            return;
        }
        self.answer_scores[index] = score.min(MAX_QUESTION_SCORE);
    }

    pub fn answer(&self, index: usize) -> &str {
        self.answers.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn answer_score(&self, index: usize) -> u8 {
        self.answer_scores.get(index).copied().unwrap_or(0)
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn answer_scores(&self) -> &[u8] {
        &self.answer_scores
    }

    /// True when the answer at `index` is non-blank.
    pub fn answered(&self, index: usize) -> bool {
        !self.answer(index).trim().is_empty()
    }
}

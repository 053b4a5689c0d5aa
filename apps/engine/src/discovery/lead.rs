//! Lead qualification: maps the five survey answers through fixed point
//! tables, totals them, and classifies the lead as hot, warm, or cold with
//! a canned next-step list per class.

use serde::{Deserialize, Serialize};

use crate::models::form::FormData;

/// Highest reachable survey total (five dimensions, two points each).
pub const MAX_LEAD_SCORE: u8 = 10;

const HOT_THRESHOLD: u8 = 8;
const WARM_THRESHOLD: u8 = 4;

/// The five survey dimensions, one select field each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyDimension {
    Awareness,
    Interest,
    Budget,
    Timeline,
    Blocker,
}

impl SurveyDimension {
    pub const ALL: [SurveyDimension; 5] = [
        SurveyDimension::Awareness,
        SurveyDimension::Interest,
        SurveyDimension::Budget,
        SurveyDimension::Timeline,
        SurveyDimension::Blocker,
    ];

    /// Form field id carrying this dimension's answer.
    pub fn field_id(&self) -> &'static str {
        match self {
            SurveyDimension::Awareness => "leadAwareness",
            SurveyDimension::Interest => "leadInterest",
            SurveyDimension::Budget => "leadBudget",
            SurveyDimension::Timeline => "leadTimeline",
            SurveyDimension::Blocker => "leadBlocker",
        }
    }

    /// Answer-to-points table. Matching is exact on the trimmed, lowercased
    /// answer; anything else scores zero.
    fn point_table(&self) -> &'static [(&'static str, u8)] {
        match self {
            SurveyDimension::Awareness => &[
                ("nessuna", 0),
                ("ne ho sentito parlare", 1),
                ("uso già strumenti digitali", 2),
            ],
            SurveyDimension::Interest => &[
                ("solo curiosità", 0),
                ("interessato", 1),
                ("molto interessato", 2),
            ],
            SurveyDimension::Budget => &[
                ("nessun budget", 0),
                ("da definire", 1),
                ("budget stanziato", 2),
            ],
            SurveyDimension::Timeline => &[
                ("oltre un anno", 0),
                ("entro sei mesi", 1),
                ("entro un mese", 2),
            ],
            SurveyDimension::Blocker => &[
                ("mancanza di budget", 0),
                ("devo convincere i soci", 1),
                ("nessun ostacolo", 2),
            ],
        }
    }
}

/// Lead temperature classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadClass {
    Hot,
    Warm,
    Cold,
}

impl LeadClass {
    pub fn label(&self) -> &'static str {
        match self {
            LeadClass::Hot => "Lead caldo",
            LeadClass::Warm => "Lead tiepido",
            LeadClass::Cold => "Lead freddo",
        }
    }

    /// Badge color the host renders the class with.
    pub fn color(&self) -> &'static str {
        match self {
            LeadClass::Hot => "#e53e3e",
            LeadClass::Warm => "#dd6b20",
            LeadClass::Cold => "#3182ce",
        }
    }

    pub fn next_steps(&self) -> &'static [&'static str] {
        match self {
            LeadClass::Hot => &[
                "Proponi una demo personalizzata entro 48 ore",
                "Prepara un'offerta con i casi studio più affini",
                "Coinvolgi subito il decisore per la firma",
            ],
            LeadClass::Warm => &[
                "Invia il report della chiamata con i benefici chiave",
                "Pianifica un follow-up entro due settimane",
                "Condividi un caso studio del suo segmento",
            ],
            LeadClass::Cold => &[
                "Inserisci il contatto nella newsletter mensile",
                "Riprova il contatto nel prossimo trimestre",
                "Annota le obiezioni emerse per la prossima chiamata",
            ],
        }
    }
}

/// Qualification result for one survey snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct LeadReport {
    pub score: u8,
    pub class: LeadClass,
    pub label: &'static str,
    pub color: &'static str,
    pub next_steps: &'static [&'static str],
}

/// Points one dimension contributes for a raw answer. Unmapped or missing
/// answers contribute zero.
pub fn dimension_points(dimension: SurveyDimension, answer: &str) -> u8 {
    let normalized = answer.trim().to_lowercase();
    dimension
        .point_table()
        .iter()
        .find(|(option, _)| *option == normalized)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Total survey score across all five dimensions.
pub fn score_survey(fields: &FormData) -> u8 {
    SurveyDimension::ALL
        .iter()
        .map(|dim| dimension_points(*dim, fields.value(dim.field_id())))
        .sum()
}

/// Classification boundaries: 8 and up is hot, 4 and up is warm.
pub fn classify(score: u8) -> LeadClass {
    if score >= HOT_THRESHOLD {
        LeadClass::Hot
    } else if score >= WARM_THRESHOLD {
        LeadClass::Warm
    } else {
        LeadClass::Cold
    }
}

/// Scores and classifies the survey in one step.
pub fn qualify(fields: &FormData) -> LeadReport {
    let score = score_survey(fields);
    let class = classify(score);
    LeadReport {
        score,
        class,
        label: class.label(),
        color: class.color(),
        next_steps: class.next_steps(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

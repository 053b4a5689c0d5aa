//! Recommendation synthesis: blends the top-ranked case studies into one
//! uplift estimate, picks a solution label and benefit list, and derives the
//! patient-volume projection with its sparkline trend.

use serde::{Deserialize, Serialize};

use crate::smartmatch::profile::{ClinicProfile, FocusBucket, MatchProfile};
use crate::smartmatch::ranking::ScoredCase;

/// Uplift clamp band, in percent.
pub const UPLIFT_MIN: u8 = 8;
pub const UPLIFT_MAX: u8 = 35;

/// Lower bound for the baseline monthly patient volume.
const VOLUME_FLOOR: u32 = 100;
/// Monthly visits assumed per staff member.
const VISITS_PER_STAFF: u32 = 90;

/// Blend weights over the three ranked slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpliftWeights {
    pub top: f64,
    pub second: f64,
    pub third: f64,
}

impl Default for UpliftWeights {
    fn default() -> Self {
        Self {
            top: 0.45,
            second: 0.35,
            third: 0.20,
        }
    }
}

/// Monthly patient volume, before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub baseline: u32,
    pub projected: u32,
}

/// Full SmartMatch output for one profile.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub solution: &'static str,
    pub benefits: Vec<&'static str>,
    pub uplift_pct: u8,
    pub volume: VolumeEstimate,
    /// Five-point sparkline from below baseline up to the projection.
    pub trend: [u32; 5],
    pub top_cases: Vec<ScoredCase>,
}

const SOLUTION_FULL_SUITE: &str =
    "Suite completa: CRM integrato, visibilità online e agenda smart";
const SOLUTION_VISIBILITY: &str = "Pacchetto visibilità online e agenda smart";

const BASE_BENEFITS: [&str; 3] = [
    "Agenda online con conferme automatiche",
    "Promemoria che riducono i no-show",
    "Report mensile su prenotazioni e ricavi",
];

const PROCESS_BENEFITS: [&str; 2] = [
    "Flussi di segreteria centralizzati in un unico pannello",
    "Meno passaggi manuali tra accettazione e sala",
];

const VISIBILITY_BENEFITS: [&str; 2] = [
    "Profilo della struttura in evidenza nelle ricerche locali",
    "Raccolta guidata di recensioni verificate",
];

/// Weighted blend of the ranked uplifts, rounded then clamped into the
/// [8, 35] band. Missing slots contribute zero, so even an empty ranking
/// lands on the band floor.
pub fn blend_uplift(top: &[ScoredCase], weights: &UpliftWeights) -> u8 {
    let slot = |i: usize| top.get(i).map(|e| f64::from(e.case.uplift)).unwrap_or(0.0);
    let raw = weights.top * slot(0) + weights.second * slot(1) + weights.third * slot(2);
    raw.round().clamp(f64::from(UPLIFT_MIN), f64::from(UPLIFT_MAX)) as u8
}

/// Picks the solution label: a CRM-class tool in the profile upgrades the
/// offer to the full suite.
pub fn solution_label(profile: &ClinicProfile) -> &'static str {
    if profile.software.contains("gipo") || profile.software.contains("crm") {
        SOLUTION_FULL_SUITE
    } else {
        SOLUTION_VISIBILITY
    }
}

/// Three baseline benefits, prefixed with two focus-specific ones for
/// process- or visibility-focused objectives.
pub fn benefit_list(focus: FocusBucket) -> Vec<&'static str> {
    let extra: &[&'static str] = match focus {
        FocusBucket::Processi => &PROCESS_BENEFITS,
        FocusBucket::Visibilita => &VISIBILITY_BENEFITS,
        FocusBucket::Prenotazioni => &[],
    };
    extra.iter().chain(BASE_BENEFITS.iter()).copied().collect()
}

/// Baseline volume is floored at 100 monthly patients; the projection
/// applies the uplift percentage and rounds. Staff counts large enough to
/// overflow the multiply saturate instead of wrapping.
pub fn volume_estimate(staff_count: u32, uplift_pct: u8) -> VolumeEstimate {
    let baseline = VOLUME_FLOOR.max(staff_count.saturating_mul(VISITS_PER_STAFF));
    let projected =
        (f64::from(baseline) * (1.0 + f64::from(uplift_pct) / 100.0)).round() as u32;
    VolumeEstimate {
        baseline,
        projected,
    }
}

/// Five display points: 85% of baseline, the midpoint up to baseline,
/// baseline itself, 92% of the projection, then the projection. Rounded to
/// whole patients; purely presentational.
pub fn trend_series(volume: VolumeEstimate) -> [u32; 5] {
    let baseline = f64::from(volume.baseline);
    let projected = f64::from(volume.projected);
    let start = baseline * 0.85;
    [
        start.round() as u32,
        ((start + baseline) / 2.0).round() as u32,
        volume.baseline,
        (projected * 0.92).round() as u32,
        volume.projected,
    ]
}

/// Assembles the full recommendation bundle from the profile and ranking.
pub fn synthesize(
    profile: &ClinicProfile,
    match_profile: &MatchProfile,
    top: Vec<ScoredCase>,
    weights: &UpliftWeights,
) -> Recommendation {
    let uplift_pct = blend_uplift(&top, weights);
    let volume = volume_estimate(profile.staff_count, uplift_pct);
    Recommendation {
        solution: solution_label(profile),
        benefits: benefit_list(match_profile.focus),
        uplift_pct,
        volume,
        trend: trend_series(volume),
        top_cases: top,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

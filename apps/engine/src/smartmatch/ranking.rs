//! Case-study ranking: tag-match scoring against the catalog, stable
//! descending sort, and greedy top-3 selection with a focus-diversity rule.

use serde::Serialize;

use crate::smartmatch::catalog::{CaseStudy, CATALOG};
use crate::smartmatch::profile::MatchProfile;

/// Points per matching size, channel, or focus tag.
const MAJOR_TAG_POINTS: u8 = 2;
/// Points for a matching software tag.
const SOFTWARE_TAG_POINTS: u8 = 1;

/// Highest score a single entry can reach (three major tags plus software).
pub const MAX_MATCH_SCORE: u8 = 3 * MAJOR_TAG_POINTS + SOFTWARE_TAG_POINTS;

/// Selection size cap.
pub const MAX_SELECTED: usize = 3;

/// Once this many entries are chosen, focus diversity stops being enforced.
const FOCUS_DIVERSITY_CUTOFF: usize = 2;

/// A catalog entry paired with its match score for one profile.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredCase {
    pub case: &'static CaseStudy,
    pub score: u8,
}

/// Scores one catalog entry against the profile: two points per matching
/// size/channel/focus tag, one for software. Unbucketed profile dimensions
/// never match.
pub fn score_case(profile: &MatchProfile, case: &CaseStudy) -> u8 {
    let mut score = 0;
    if profile.size == case.tags.size {
        score += MAJOR_TAG_POINTS;
    }
    if profile.channel == Some(case.tags.channel) {
        score += MAJOR_TAG_POINTS;
    }
    if profile.focus == case.tags.focus {
        score += MAJOR_TAG_POINTS;
    }
    if profile.software == Some(case.tags.software) {
        score += SOFTWARE_TAG_POINTS;
    }
    score
}

/// Scores the whole catalog and sorts descending. The sort is stable, so
/// entries with equal scores keep their catalog order.
pub fn rank_catalog(profile: &MatchProfile) -> Vec<ScoredCase> {
    let mut ranked: Vec<ScoredCase> = CATALOG
        .iter()
        .map(|case| ScoredCase {
            case,
            score: score_case(profile, case),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Greedy top-3 selection over a ranked slice.
///
/// Walks the ranking in order and picks entries, skipping any whose focus
/// tag is already represented while fewer than two entries are chosen.
/// Skipped entries are not revisited, so a focus-heavy ranking can select
/// fewer than three.
pub fn select_top(ranked: &[ScoredCase]) -> Vec<ScoredCase> {
    let mut selected: Vec<ScoredCase> = Vec::with_capacity(MAX_SELECTED);

    for entry in ranked {
        if selected.len() >= MAX_SELECTED {
            break;
        }
        let focus_taken = selected
            .iter()
            .any(|chosen| chosen.case.tags.focus == entry.case.tags.focus);
        if focus_taken && selected.len() < FOCUS_DIVERSITY_CUTOFF {
            continue;
        }
        selected.push(*entry);
    }

    selected
}

/// Full ranking pipeline: score, sort, select.
pub fn recommend_cases(profile: &MatchProfile) -> Vec<ScoredCase> {
    select_top(&rank_catalog(profile))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

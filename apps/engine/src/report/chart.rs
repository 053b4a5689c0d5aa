//! Chart payloads and the owned-handle contract with the rendering target.
//! A slot holds at most one live chart and always disposes it before
//! mounting a replacement.

use serde::{Deserialize, Serialize};

use crate::discovery::progress::CallScores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Line,
}

/// Everything the rendering target needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    pub colors: Vec<String>,
}

/// Two-color palette the chart builders draw from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPalette {
    pub primary: String,
    pub secondary: String,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            primary: "#3182ce".to_string(),
            secondary: "#e53e3e".to_string(),
        }
    }
}

/// Doughnut over the two call-score halves.
pub fn score_doughnut(scores: CallScores, palette: &ChartPalette) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        labels: vec!["Pain Score".to_string(), "Closing Score".to_string()],
        series: vec![f64::from(scores.pain_pct), f64::from(scores.closing_pct)],
        colors: vec![palette.secondary.clone(), palette.primary.clone()],
    }
}

/// Line chart over the five-point volume trend.
pub fn trend_line(trend: &[u32; 5], palette: &ChartPalette) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        labels: ["Oggi", "Mese 1", "Mese 2", "Mese 3", "Obiettivo"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        series: trend.iter().map(|&v| f64::from(v)).collect(),
        colors: vec![palette.primary.clone()],
    }
}

/// Opaque identifier for a mounted chart, issued by the rendering target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartHandle(pub u64);

/// The rendering target. `mount` materializes a chart and hands back its
/// handle; `unmount` releases everything behind one.
pub trait ChartRenderer {
    fn mount(&mut self, spec: &ChartSpec) -> ChartHandle;
    fn unmount(&mut self, handle: ChartHandle);
}

/// Owner of at most one live chart. Replacing the chart disposes the old
/// handle first, so a renderer never sees two charts for the same slot.
#[derive(Debug, Default)]
pub struct ChartSlot {
    handle: Option<ChartHandle>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, renderer: &mut dyn ChartRenderer, spec: &ChartSpec) {
        if let Some(old) = self.handle.take() {
            renderer.unmount(old);
        }
        self.handle = Some(renderer.mount(spec));
    }

    pub fn dispose(&mut self, renderer: &mut dyn ChartRenderer) {
        if let Some(old) = self.handle.take() {
            renderer.unmount(old);
        }
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Test double that records every mount and unmount in order.
    #[derive(Default)]
    struct RecordingRenderer {
        next_id: u64,
        events: Vec<String>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn mount(&mut self, spec: &ChartSpec) -> ChartHandle {
            self.next_id += 1;
            self.events.push(format!("mount {} {:?}", self.next_id, spec.kind));
            ChartHandle(self.next_id)
        }

        fn unmount(&mut self, handle: ChartHandle) {
            self.events.push(format!("unmount {}", handle.0));
        }
    }

    fn doughnut() -> ChartSpec {
        score_doughnut(
            CallScores {
                pain_pct: 50,
                closing_pct: 25,
            },
            &ChartPalette::default(),
        )
    }

    #[test]
    fn test_score_doughnut_payload() {
        let spec = doughnut();
        assert_eq!(spec.kind, ChartKind::Doughnut);
        assert_eq!(spec.labels, vec!["Pain Score", "Closing Score"]);
        assert_eq!(spec.series, vec![50.0, 25.0]);
        assert_eq!(spec.colors.len(), 2);
    }

    #[test]
    fn test_trend_line_payload() {
        let spec = trend_line(&[850, 925, 1000, 1104, 1200], &ChartPalette::default());
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.labels.len(), 5);
        assert_eq!(spec.series, vec![850.0, 925.0, 1000.0, 1104.0, 1200.0]);
    }

    #[test]
    fn test_slot_disposes_before_replacing() {
        let mut renderer = RecordingRenderer::default();
        let mut slot = ChartSlot::new();

        slot.render(&mut renderer, &doughnut());
        slot.render(&mut renderer, &doughnut());

        assert_eq!(
            renderer.events,
            vec![
                "mount 1 Doughnut".to_string(),
                "unmount 1".to_string(),
                "mount 2 Doughnut".to_string(),
            ]
        );
        assert!(slot.is_live());
    }

    #[test]
    fn test_dispose_releases_and_empties_slot() {
        let mut renderer = RecordingRenderer::default();
        let mut slot = ChartSlot::new();

        slot.dispose(&mut renderer);
        assert!(renderer.events.is_empty(), "empty slot disposes nothing");

        slot.render(&mut renderer, &doughnut());
        slot.dispose(&mut renderer);
        assert!(!slot.is_live());
        assert_eq!(renderer.events.last().map(String::as_str), Some("unmount 1"));
    }
}

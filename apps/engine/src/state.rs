//! Engine facade: owns the form, the session, the store, and the render and
//! export seams, and re-runs the scoring pipeline after every mutation.
//!
//! Flow per refresh: progress → call scores → score chart → (completion
//! gate) → profile → ranking → recommendation → trend chart → lead report.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::discovery::lead::{qualify, LeadReport, SurveyDimension};
use crate::discovery::onboarding::OnboardingState;
use crate::discovery::progress::{call_scores, completion_percent, CallScores};
use crate::errors::EngineError;
use crate::models::form::FormState;
use crate::models::session::SessionState;
use crate::report::chart::{
    score_doughnut, trend_line, ChartPalette, ChartRenderer, ChartSlot, ChartSpec,
};
use crate::report::document::{layout_document, DocumentLayout, LogoImage};
use crate::report::spreadsheet::{build_table, share_rows, ExportRow, SpreadsheetTable};
use crate::smartmatch::profile::{extract_profile, ClinicProfile, MatchProfile};
use crate::smartmatch::ranking::recommend_cases;
use crate::smartmatch::recommendation::{synthesize, Recommendation, UpliftWeights};
use crate::store::{load_session, save_session, FileStore, MemoryStore, StateStore};

/// Tuning knobs the host hands the engine at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Completion percentage that unlocks the SmartMatch panel.
    pub smartmatch_threshold: u8,
    pub uplift_weights: UpliftWeights,
    pub palette: ChartPalette,
    /// Language applied to sessions with no saved preference.
    pub language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smartmatch_threshold: 60,
            uplift_weights: UpliftWeights::default(),
            palette: ChartPalette::default(),
            language: "it".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            smartmatch_threshold: config.smartmatch_threshold,
            language: config.language.clone(),
            ..Self::default()
        }
    }
}

/// Spreadsheet export target. The writer owns file generation; the engine
/// only hands it the table.
pub trait SpreadsheetWriter {
    fn write(&mut self, table: &SpreadsheetTable) -> Result<(), EngineError>;
}

/// Document export target.
pub trait DocumentWriter {
    fn write(&mut self, layout: &DocumentLayout) -> Result<(), EngineError>;
}

/// Everything SmartMatch derives for one form snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SmartMatchBundle {
    pub profile: ClinicProfile,
    pub tags: MatchProfile,
    pub recommendation: Recommendation,
    pub trend_chart: ChartSpec,
}

/// One refresh pass over the whole dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct RenderUpdate {
    pub completion_pct: u8,
    pub scores: CallScores,
    pub score_chart: ChartSpec,
    /// Present only once completion reaches the SmartMatch threshold.
    pub smartmatch: Option<SmartMatchBundle>,
    pub lead: LeadReport,
}

pub struct Engine {
    config: EngineConfig,
    store: Box<dyn StateStore>,
    form: FormState,
    session: SessionState,
    onboarding: OnboardingState,
    renderer: Option<Box<dyn ChartRenderer>>,
    score_slot: ChartSlot,
    trend_slot: ChartSlot,
    spreadsheet_writer: Option<Box<dyn SpreadsheetWriter>>,
    document_writer: Option<Box<dyn DocumentWriter>>,
    logo: Option<LogoImage>,
}

impl Engine {
    /// Builds the engine on top of a store, restoring any saved session.
    /// Answer scores are rebuilt from blankness; rated hosts re-apply their
    /// per-answer scores after construction.
    pub fn new(store: Box<dyn StateStore>, config: EngineConfig) -> Self {
        let session = load_session(store.as_ref(), &config.language);

        let mut form = FormState::new();
        form.strategic_context = session.strategic_context.clone();
        for (i, answer) in session.spin_answers.iter().enumerate() {
            form.set_answer(i, answer.clone());
        }

        let onboarding = OnboardingState::from_completed_flag(session.onboarding_completed);
        info!(language = %session.language, "engine ready");

        Engine {
            config,
            store,
            form,
            session,
            onboarding,
            renderer: None,
            score_slot: ChartSlot::new(),
            trend_slot: ChartSlot::new(),
            spreadsheet_writer: None,
            document_writer: None,
            logo: None,
        }
    }

    /// File-backed engine configured entirely from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let store = FileStore::from_config(&config);
        Ok(Engine::new(Box::new(store), EngineConfig::from_config(&config)))
    }

    /// Throwaway engine for tests and embedded hosts.
    pub fn with_memory_store(config: EngineConfig) -> Self {
        Engine::new(Box::new(MemoryStore::new()), config)
    }

    // ──── collaborator injection ────

    pub fn set_renderer(&mut self, renderer: Box<dyn ChartRenderer>) {
        self.renderer = Some(renderer);
    }

    pub fn set_spreadsheet_writer(&mut self, writer: Box<dyn SpreadsheetWriter>) {
        self.spreadsheet_writer = Some(writer);
    }

    pub fn set_document_writer(&mut self, writer: Box<dyn DocumentWriter>) {
        self.document_writer = Some(writer);
    }

    pub fn set_logo(&mut self, logo: Option<LogoImage>) {
        self.logo = logo;
    }

    // ──── accessors ────

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ──── form mutation ────

    pub fn set_context(&mut self, text: impl Into<String>) -> RenderUpdate {
        self.form.strategic_context = text.into();
        self.save();
        self.refresh()
    }

    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> RenderUpdate {
        self.form.set_answer(index, text);
        self.save();
        self.refresh()
    }

    pub fn set_answer_score(&mut self, index: usize, score: u8) -> RenderUpdate {
        self.form.set_answer_score(index, score);
        self.refresh()
    }

    /// Updates one raw field (profile selects, survey answers, "altro"
    /// companions). These are transient and never persisted.
    pub fn set_field(
        &mut self,
        id: impl Into<String>,
        value: impl Into<String>,
    ) -> RenderUpdate {
        self.form.fields.set(id, value);
        self.refresh()
    }

    /// Typed shortcut for one qualification-survey answer.
    pub fn set_survey_answer(
        &mut self,
        dimension: SurveyDimension,
        answer: impl Into<String>,
    ) -> RenderUpdate {
        self.set_field(dimension.field_id(), answer)
    }

    // ──── preferences ────

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.session.language = language.into();
        self.save();
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.session.dark_mode = dark;
        self.save();
    }

    pub fn set_auto_theme(&mut self, auto: bool) {
        self.session.auto_theme = auto;
        self.save();
    }

    // ──── onboarding ────

    pub fn onboarding(&self) -> OnboardingState {
        self.onboarding
    }

    pub fn onboarding_start(&mut self) -> OnboardingState {
        self.onboarding = self.onboarding.start();
        self.onboarding
    }

    /// Advances the wizard; completing it persists the flag immediately.
    pub fn onboarding_next(&mut self) -> OnboardingState {
        self.onboarding = self.onboarding.next();
        if self.onboarding.is_completed() && !self.session.onboarding_completed {
            self.session.onboarding_completed = true;
            self.save();
        }
        self.onboarding
    }

    pub fn onboarding_prev(&mut self) -> OnboardingState {
        self.onboarding = self.onboarding.prev();
        self.onboarding
    }

    // ──── scoring pipeline ────

    /// Recomputes the dashboard and drives the chart slots. SmartMatch only
    /// runs once completion reaches the threshold; dropping back below it
    /// disposes the trend chart.
    pub fn refresh(&mut self) -> RenderUpdate {
        let completion_pct = completion_percent(&self.form);
        let scores = call_scores(&self.form);
        let score_chart = score_doughnut(scores, &self.config.palette);

        if let Some(renderer) = self.renderer.as_deref_mut() {
            self.score_slot.render(renderer, &score_chart);
        }

        let smartmatch = if completion_pct >= self.config.smartmatch_threshold {
            let bundle = self.smartmatch();
            if let Some(renderer) = self.renderer.as_deref_mut() {
                self.trend_slot.render(renderer, &bundle.trend_chart);
            }
            Some(bundle)
        } else {
            if let Some(renderer) = self.renderer.as_deref_mut() {
                self.trend_slot.dispose(renderer);
            }
            None
        };

        let lead = qualify(&self.form.fields);

        RenderUpdate {
            completion_pct,
            scores,
            score_chart,
            smartmatch,
            lead,
        }
    }

    /// Computes the SmartMatch bundle for the current form, ignoring the
    /// completion gate.
    pub fn smartmatch(&self) -> SmartMatchBundle {
        let profile = extract_profile(&self.form.fields);
        let tags = MatchProfile::from_profile(&profile);
        let top = recommend_cases(&tags);
        let recommendation = synthesize(&profile, &tags, top, &self.config.uplift_weights);
        let trend_chart = trend_line(&recommendation.trend, &self.config.palette);
        SmartMatchBundle {
            profile,
            tags,
            recommendation,
            trend_chart,
        }
    }

    // ──── exports ────

    pub fn export_spreadsheet(&mut self) -> Result<(), EngineError> {
        let table = build_table(&self.form);
        match self.spreadsheet_writer.as_deref_mut() {
            Some(writer) => {
                info!(rows = table.rows.len(), "exporting spreadsheet report");
                writer.write(&table)
            }
            None => {
                warn!("spreadsheet export requested without a writer");
                Err(EngineError::ExportUnavailable("spreadsheet"))
            }
        }
    }

    /// Exports the document report. The recommendation block is included
    /// only once the SmartMatch gate has been reached.
    pub fn export_document(&mut self) -> Result<(), EngineError> {
        let gated = completion_percent(&self.form) >= self.config.smartmatch_threshold;
        let bundle = gated.then(|| self.smartmatch());
        let layout = layout_document(
            &self.form,
            bundle.as_ref().map(|b| &b.recommendation),
            self.logo.as_ref(),
        );
        match self.document_writer.as_deref_mut() {
            Some(writer) => {
                info!(ops = layout.ops.len(), "exporting document report");
                writer.write(&layout)
            }
            None => {
                warn!("document export requested without a writer");
                Err(EngineError::ExportUnavailable("document"))
            }
        }
    }

    pub fn share_rows(&self) -> Vec<ExportRow> {
        share_rows(&self.form)
    }

    // ──── persistence ────

    /// Syncs the session from the form and writes it through the store.
    /// Store failures degrade to a warning; the in-memory state stays valid.
    fn save(&mut self) {
        self.session.strategic_context = self.form.strategic_context.clone();
        self.session.spin_answers = self.form.answers().to_vec();
        if let Err(e) = save_session(self.store.as_mut(), &mut self.session) {
            warn!("state save failed: {e}");
        }
    }

    /// Wipes the store and every piece of in-memory state, disposing any
    /// live charts, then re-renders the empty dashboard.
    pub fn reset(&mut self) -> RenderUpdate {
        if let Err(e) = self.store.clear() {
            warn!("reset failed to clear the store: {e}");
        }
        self.form = FormState::new();
        self.session = SessionState {
            language: self.config.language.clone(),
            ..SessionState::default()
        };
        self.onboarding = OnboardingState::NotStarted;
        if let Some(renderer) = self.renderer.as_deref_mut() {
            self.score_slot.dispose(renderer);
            self.trend_slot.dispose(renderer);
        }
        info!("session reset");
        self.refresh()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::models::session::STATE_KEY;
    use crate::report::chart::ChartHandle;
    use crate::smartmatch::profile::fields;

    #[derive(Default)]
    struct SharedRenderer {
        next_id: u64,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ChartRenderer for SharedRenderer {
        fn mount(&mut self, spec: &ChartSpec) -> ChartHandle {
            self.next_id += 1;
            self.events
                .borrow_mut()
                .push(format!("mount {:?} {}", spec.kind, self.next_id));
            ChartHandle(self.next_id)
        }

        fn unmount(&mut self, handle: ChartHandle) {
            self.events.borrow_mut().push(format!("unmount {}", handle.0));
        }
    }

    struct SharedSheetWriter {
        row_counts: Rc<RefCell<Vec<usize>>>,
    }

    impl SpreadsheetWriter for SharedSheetWriter {
        fn write(&mut self, table: &SpreadsheetTable) -> Result<(), EngineError> {
            self.row_counts.borrow_mut().push(table.rows.len());
            Ok(())
        }
    }

    struct SharedDocWriter {
        op_counts: Rc<RefCell<Vec<usize>>>,
    }

    impl DocumentWriter for SharedDocWriter {
        fn write(&mut self, layout: &DocumentLayout) -> Result<(), EngineError> {
            self.op_counts.borrow_mut().push(layout.ops.len());
            Ok(())
        }
    }

    fn answer_first(engine: &mut Engine, count: usize) -> RenderUpdate {
        let mut last = engine.refresh();
        for i in 0..count {
            last = engine.set_answer(i, format!("risposta {i}"));
        }
        last
    }

    #[test]
    fn test_fresh_engine_starts_empty() {
        let engine = Engine::with_memory_store(EngineConfig::default());
        assert_eq!(engine.form().strategic_context, "");
        assert_eq!(engine.session().language, "it");
        assert_eq!(engine.onboarding(), OnboardingState::NotStarted);
    }

    #[test]
    fn test_corrupt_blob_still_seeds_the_configured_language() {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, "{not json").expect("set");

        let config = EngineConfig {
            language: "en".to_string(),
            ..EngineConfig::default()
        };
        let engine = Engine::new(Box::new(store), config);
        assert_eq!(engine.session().language, "en");
    }

    #[test]
    fn test_refresh_gates_smartmatch_at_threshold() {
        let mut engine = Engine::with_memory_store(EngineConfig::default());

        // 4 of 8 answers → 50%, below the 60% gate.
        let update = answer_first(&mut engine, 4);
        assert_eq!(update.completion_pct, 50);
        assert!(update.smartmatch.is_none());

        // 5 of 8 → 63%, gate open.
        let update = engine.set_answer(4, "quinta risposta");
        assert_eq!(update.completion_pct, 63);
        let bundle = update.smartmatch.expect("gate open at 63%");
        assert_eq!(bundle.recommendation.top_cases.len(), 3);
    }

    #[test]
    fn test_fields_drive_the_recommendation() {
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        engine.set_field(fields::STAFF_COUNT, "15");
        engine.set_field(fields::SOFTWARE, "Gipo CRM");
        engine.set_field(fields::BOOKING_CHANNEL, "prenota via telefono");
        let update = engine.set_field(fields::OBJECTIVE, "migliorare i processi");

        assert!(update.smartmatch.is_none(), "form still below the gate");
        let bundle = engine.smartmatch();
        assert_eq!(bundle.recommendation.top_cases[0].case.name, "Clinica Borgo");
        assert_eq!(bundle.recommendation.uplift_pct, 20);
        assert_eq!(bundle.profile.staff_count, 15);
    }

    #[test]
    fn test_oversized_staff_count_saturates_the_projection() {
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        engine.set_field(fields::STAFF_COUNT, "100000000");

        let update = answer_first(&mut engine, 5);
        let bundle = update.smartmatch.expect("gate open at 63%");
        assert_eq!(bundle.profile.staff_count, 100_000_000);
        assert_eq!(bundle.recommendation.volume.baseline, u32::MAX);
    }

    #[test]
    fn test_answers_survive_reload_through_file_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        let mut engine = Engine::new(Box::new(store), EngineConfig::default());
        engine.set_context("Rete di tre ambulatori");
        engine.set_answer(0, "Agenda cartacea e telefono");
        engine.set_language("en");
        drop(engine);

        let store = FileStore::open(&path);
        let engine = Engine::new(Box::new(store), EngineConfig::default());
        assert_eq!(engine.form().strategic_context, "Rete di tre ambulatori");
        assert_eq!(engine.form().answer(0), "Agenda cartacea e telefono");
        assert_eq!(engine.session().language, "en");
    }

    #[test]
    fn test_trend_chart_mounts_and_disposes_with_the_gate() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        engine.set_renderer(Box::new(SharedRenderer {
            next_id: 0,
            events: Rc::clone(&events),
        }));

        answer_first(&mut engine, 5);
        assert!(
            events.borrow().iter().any(|e| e.contains("mount Line")),
            "trend chart mounted above the gate"
        );

        // Blank one answer: 4 of 8 → 50%, trend chart must go away.
        engine.set_answer(4, "");
        let trend_mounts = events
            .borrow()
            .iter()
            .filter(|e| e.contains("mount Line"))
            .count();
        let last = events.borrow().last().cloned().expect("events");
        assert!(last.starts_with("unmount"), "last event disposes the trend chart");
        assert_eq!(trend_mounts, 1, "no remount below the gate");
    }

    #[test]
    fn test_score_chart_replaces_previous_mount() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        engine.set_renderer(Box::new(SharedRenderer {
            next_id: 0,
            events: Rc::clone(&events),
        }));

        engine.refresh();
        engine.refresh();

        let recorded = events.borrow();
        assert_eq!(recorded[0], "mount Doughnut 1");
        assert_eq!(recorded[1], "unmount 1");
        assert_eq!(recorded[2], "mount Doughnut 2");
    }

    #[test]
    fn test_exports_fail_without_writers() {
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        assert!(matches!(
            engine.export_spreadsheet(),
            Err(EngineError::ExportUnavailable("spreadsheet"))
        ));
        assert!(matches!(
            engine.export_document(),
            Err(EngineError::ExportUnavailable("document"))
        ));
    }

    #[test]
    fn test_export_spreadsheet_hands_over_non_empty_rows() {
        let row_counts = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        engine.set_spreadsheet_writer(Box::new(SharedSheetWriter {
            row_counts: Rc::clone(&row_counts),
        }));

        engine.set_context("contesto");
        engine.set_answer(0, "prima risposta");
        engine.export_spreadsheet().expect("export");

        assert_eq!(row_counts.borrow().as_slice(), &[2]);
    }

    #[test]
    fn test_export_document_counts_every_question() {
        let op_counts = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        engine.set_document_writer(Box::new(SharedDocWriter {
            op_counts: Rc::clone(&op_counts),
        }));

        engine.export_document().expect("export");
        // Title + context + 8 questions + date, no logo and no gate.
        assert_eq!(op_counts.borrow().as_slice(), &[11]);
    }

    #[test]
    fn test_onboarding_completion_is_persisted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        let mut engine = Engine::new(Box::new(store), EngineConfig::default());
        engine.onboarding_start();
        for _ in 0..crate::discovery::onboarding::ONBOARDING_STEPS.len() {
            engine.onboarding_next();
        }
        assert!(engine.onboarding().is_completed());
        drop(engine);

        let store = FileStore::open(&path);
        let engine = Engine::new(Box::new(store), EngineConfig::default());
        assert_eq!(engine.onboarding(), OnboardingState::Completed);
    }

    #[test]
    fn test_reset_clears_state_and_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        let store = FileStore::open(&path);
        let mut engine = Engine::new(Box::new(store), EngineConfig::default());
        engine.set_context("da cancellare");
        let update = engine.reset();

        assert_eq!(update.completion_pct, 0);
        assert_eq!(engine.form().strategic_context, "");
        drop(engine);

        let store = FileStore::open(&path);
        assert_eq!(store.get(STATE_KEY), None, "reset wipes the saved blob");
    }

    #[test]
    fn test_lead_report_rides_along_every_refresh() {
        let mut engine = Engine::with_memory_store(EngineConfig::default());
        let update = engine.refresh();
        assert_eq!(update.lead.score, 0);

        engine.set_survey_answer(SurveyDimension::Interest, "molto interessato");
        engine.set_survey_answer(SurveyDimension::Budget, "budget stanziato");
        let update = engine.set_field("leadTimeline", "entro un mese");
        assert_eq!(update.lead.score, 6);
        assert_eq!(update.lead.label, "Lead tiepido");
    }
}

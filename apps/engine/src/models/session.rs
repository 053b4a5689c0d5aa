//! Persisted session snapshot: the JSON blob written under the `qpwonState`
//! key. Keys stay camelCase so the blob round-trips with what the host page
//! reads and writes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::form::SPIN_QUESTIONS;

/// Store key holding the session blob.
pub const STATE_KEY: &str = "qpwonState";

/// Pre-rework key that held the onboarding flag on its own. Honored on load
/// as a migration fallback, never written.
pub const LEGACY_ONBOARDED_KEY: &str = "qpwonOnboarded";

/// Everything that survives a page reload: strategic context, the eight
/// answers, preferences, and the onboarding flag. Profile selects and the
/// qualification survey are transient and re-supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_id: Uuid,
    pub strategic_context: String,
    pub spin_answers: Vec<String>,
    pub language: String,
    pub dark_mode: bool,
    pub auto_theme: bool,
    pub onboarding_completed: bool,
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            session_id: Uuid::new_v4(),
            strategic_context: String::new(),
            spin_answers: vec![String::new(); SPIN_QUESTIONS.len()],
            language: "it".to_string(),
            dark_mode: false,
            auto_theme: true,
            onboarding_completed: false,
            saved_at: None,
        }
    }
}

impl SessionState {
    /// Rebuilds a session from a parsed blob, one key at a time. An absent
    /// or malformed key keeps its default, so a single bad field never
    /// discards the rest of the snapshot.
    pub fn from_value(value: &Value) -> Self {
        let mut state = SessionState::default();

        if let Some(id) = value.get("sessionId").and_then(Value::as_str) {
            if let Ok(parsed) = Uuid::parse_str(id) {
                state.session_id = parsed;
            }
        }
        if let Some(ctx) = value.get("strategicContext").and_then(Value::as_str) {
            state.strategic_context = ctx.to_string();
        }
        if let Some(answers) = value.get("spinAnswers").and_then(Value::as_array) {
            for (i, entry) in answers.iter().take(state.spin_answers.len()).enumerate() {
                if let Some(text) = entry.as_str() {
                    state.spin_answers[i] = text.to_string();
                }
            }
        }
        if let Some(lang) = value.get("language").and_then(Value::as_str) {
            state.language = lang.to_string();
        }
        if let Some(dark) = value.get("darkMode").and_then(Value::as_bool) {
            state.dark_mode = dark;
        }
        if let Some(auto) = value.get("autoTheme").and_then(Value::as_bool) {
            state.auto_theme = auto;
        }
        if let Some(done) = value.get("onboardingCompleted").and_then(Value::as_bool) {
            state.onboarding_completed = done;
        }
        if let Some(ts) = value.get("savedAt").and_then(Value::as_str) {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(ts) {
                state.saved_at = Some(parsed.with_timezone(&Utc));
            }
        }

        state
    }
}

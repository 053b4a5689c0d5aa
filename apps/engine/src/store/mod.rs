//! Key-value persistence in the shape of the browser's localStorage: string
//! keys, string values, blocking synchronous access, single writer assumed.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::EngineError;
use crate::models::session::{SessionState, LEGACY_ONBOARDED_KEY, STATE_KEY};

/// Storage seam the engine persists through. `get` returns the raw string
/// or nothing; writes replace whole values.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError>;
    fn remove(&mut self, key: &str) -> Result<(), EngineError>;
    fn clear(&mut self) -> Result<(), EngineError>;
}

/// Stamps the save time and writes the session blob under its key.
pub fn save_session(
    store: &mut dyn StateStore,
    session: &mut SessionState,
) -> Result<(), EngineError> {
    session.saved_at = Some(chrono::Utc::now());
    let blob = serde_json::to_string(session)?;
    store.set(STATE_KEY, &blob)
}

/// Loads the session blob. A missing or unparseable blob degrades to a
/// fresh state in the given default language. Also honors the legacy
/// standalone onboarding key when the blob itself carries no flag.
pub fn load_session(store: &dyn StateStore, default_language: &str) -> SessionState {
    let fresh = || SessionState {
        language: default_language.to_string(),
        ..SessionState::default()
    };
    let mut session = match store.get(STATE_KEY) {
        None => {
            debug!("no saved session, starting fresh");
            fresh()
        }
        Some(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => SessionState::from_value(&value),
            Err(e) => {
                warn!("discarding unreadable session blob: {e}");
                fresh()
            }
        },
    };

    if !session.onboarding_completed {
        if let Some(flag) = store.get(LEGACY_ONBOARDED_KEY) {
            session.onboarding_completed = flag == "true";
        }
    }

    session
}

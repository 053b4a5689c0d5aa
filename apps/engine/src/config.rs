use std::path::PathBuf;

use anyhow::{Context, Result};

/// Engine configuration loaded from environment variables.
/// Every variable is optional; sensible defaults keep the engine usable
/// without any environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the file-backed store keeps the session blob.
    pub state_path: PathBuf,
    /// UI language tag, `it` by default.
    pub language: String,
    /// Completion percentage that unlocks the SmartMatch panel.
    pub smartmatch_threshold: u8,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            state_path: std::env::var("SPINMATCH_STATE_PATH")
                .unwrap_or_else(|_| "spinmatch_state.json".to_string())
                .into(),
            language: std::env::var("SPINMATCH_LANG").unwrap_or_else(|_| "it".to_string()),
            smartmatch_threshold: std::env::var("SPINMATCH_MATCH_THRESHOLD")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u8>()
                .context("SPINMATCH_MATCH_THRESHOLD must be a percentage between 0 and 100")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            state_path: PathBuf::from("spinmatch_state.json"),
            language: "it".to_string(),
            smartmatch_threshold: 60,
            rust_log: "info".to_string(),
        }
    }
}

//! QPWONSpin discovery engine: SPIN form state, call scoring, SmartMatch
//! case-study matching and lead qualification for GipoNext sales calls,
//! plus the persistence layer and the chart/spreadsheet/document export
//! seams the embedding host renders through.

pub mod config;
pub mod discovery;
pub mod errors;
pub mod models;
pub mod report;
pub mod smartmatch;
pub mod state;
pub mod store;

pub use config::Config;
pub use errors::EngineError;
pub use state::{Engine, EngineConfig, RenderUpdate, SmartMatchBundle};

// SmartMatch recommendation engine.
// Implements: profile extraction, case-study ranking, top-3 selection,
// recommendation synthesis. Pure synchronous computation; no IO here.

pub mod catalog;
pub mod profile;
pub mod ranking;
pub mod recommendation;

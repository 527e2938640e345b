// ChatbotQuery - app/mod.rs
//
// Application layer: UI state and background request orchestration.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod query;
pub mod state;

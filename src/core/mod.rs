// ChatbotQuery - core/mod.rs
//
// Core business logic layer: request construction, response classification,
// and response rendering.
// Dependencies: serde_json, url, util.
// Must NOT depend on: ui, platform, app, or perform network I/O directly.

pub mod model;
pub mod request;

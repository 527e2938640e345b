// ChatbotQuery - platform/mod.rs
//
// Platform abstraction layer: network transport, directories, config file.
// Dependencies: standard library, directories, ureq, toml.
// Must NOT depend on: app, ui.

pub mod config;
pub mod http;

// ChatbotQuery - ui/panels/mod.rs

pub mod about;
pub mod query;
pub mod response;

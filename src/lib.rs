//! Resilience Engine - deterministic round-effect engine for an initiative-card strategy game

pub mod core;
pub mod difficulty;
pub mod engine;
pub mod rules;
pub mod session;

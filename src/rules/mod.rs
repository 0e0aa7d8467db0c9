//! Scenario rules loaded from TOML: cards, synergies, disasters

pub mod card;
pub mod config;
pub mod disaster;
mod loader;
pub mod synergy;

pub use card::{Card, CardCatalog, UnlockCondition, UnlockThresholds};
pub use config::{GameConfig, TokenMechanics};
pub use disaster::DisasterRule;
pub use loader::{load_scenario, parse_scenario};
pub use synergy::SynergyRule;

//! Round-effect engine
//!
//! Pure, synchronous functions over immutable inputs. Nothing here holds state,
//! logs, or fails; identical inputs always give bit-identical outputs.

pub mod allocation;
pub mod disaster;
pub mod round;
pub mod synergy;

pub use allocation::{apply_allocation_effects, effective_tokens, sprawl_penalty, token_multiplier};
pub use disaster::{apply_disaster_penalties, TriggeredDisaster};
pub use round::{calculate_round_effects, RoundResult};
pub use synergy::{apply_synergy_bonuses, synergy_scale, ActiveSynergy};

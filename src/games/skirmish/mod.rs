//! The tactical skirmish ruleset.
//!
//! Characters from a data table stand on a small grid and take turns:
//! - Each turn the active character spends up to two action slots
//! - Actions move, attack, heal, shield, displace enemies or apply statuses
//! - Used actions go on cooldown, counted in turn boundaries
//! - The last team with a living character wins
//!
//! Any number of characters and teams is supported.

mod game;
mod view;

pub use game::{Skirmish, SkirmishBuilder};
pub use view::{ActionView, CharacterView, RosterView, TurnView};

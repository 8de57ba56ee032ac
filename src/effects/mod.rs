//! Effect system for skirmish actions.
//!
//! Effects are the building blocks of character actions:
//! - `Effect`: every effect kind an action can carry
//! - `TargetSpec` / `TargetSelector`: who a targeted effect can reach
//! - `ActionResolver`: executes an action's effects on match state
//!
//! ## Two-step actions
//!
//! Immediate effects resolve the moment an action is selected. An action's
//! one targeted effect (movement, attack or heal) then waits in the match
//! phase until the controller confirms a cell or targets.

mod effect;
mod targeting;
mod resolver;

pub use effect::Effect;
pub use targeting::{first_enemy, validate_choice, Disposition, TargetSelector, TargetSpec};
pub use resolver::{ActionResolver, Hit, Resolution};

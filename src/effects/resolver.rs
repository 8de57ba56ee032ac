//! Action resolution: executing an action's effects on match state.
//!
//! Resolution happens in two steps:
//!
//! 1. [`ActionResolver::select_action`] checks the action can be used,
//!    resolves its immediate effects in definition order, starts its
//!    cooldown and, for targeted actions, rolls the magnitude and computes
//!    the candidate cells or characters.
//! 2. [`ActionResolver::confirm_cell`] / [`ActionResolver::confirm_targets`]
//!    finish a pending targeted action, or [`ActionResolver::cancel`]
//!    abandons it.
//!
//! Rejections leave the state untouched. Slot accounting and turn changes
//! are the turn controller's job.

use tracing::debug;

use super::targeting::{first_enemy, validate_choice, TargetSelector, TargetSpec};
use super::Effect;
use crate::board::{reachable_cells, Pos};
use crate::core::{
    ActionClass, CharacterId, MatchConfig, MatchState, PendingAction, PendingKind, Phase,
};
use crate::error::ActionError;

/// Outcome of selecting an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Every effect resolved. The action fills a slot of this class.
    Completed(ActionClass),
    /// A targeted effect waits for a cell or target choice.
    AwaitingTarget,
}

/// The effect of one attack, heal or pierce on one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub target: CharacterId,
    /// Damage dealt or hit points restored.
    pub amount: i32,
    /// Did this hit defeat the target?
    pub defeated: bool,
}

/// Resolves actions on match state.
pub struct ActionResolver;

impl ActionResolver {
    /// Start the active character's action `key`.
    pub fn select_action(
        state: &mut MatchState,
        config: &MatchConfig,
        key: &str,
    ) -> Result<Resolution, ActionError> {
        let actor_id = state.active_id();
        let action = {
            let actor = state.active();
            if state.pending().is_some() {
                return reject(ActionError::AwaitingTarget);
            }
            if !actor.is_alive() {
                return reject(ActionError::Defeated(actor_id));
            }
            let Some(action) = actor.action(key) else {
                return reject(ActionError::UnknownAction(key.to_string()));
            };
            let remaining = actor.cooldown(key);
            if remaining > 0 {
                return reject(ActionError::OnCooldown {
                    key: key.to_string(),
                    remaining,
                });
            }
            if !state.slot_available(config, action.class()) {
                return reject(ActionError::NoSlot);
            }
            action.clone()
        };

        debug!(actor = %actor_id, key, name = %action.name, "action selected");

        for effect in action.effects.iter().filter(|e| !e.is_targeted()) {
            Self::apply_immediate(state, actor_id, effect);
        }
        state.active_mut().start_cooldown(key);

        let class = action.class();
        match action.targeted_effect() {
            None => Ok(Resolution::Completed(class)),
            Some(effect) => {
                let kind = Self::prepare_targeted(state, config, actor_id, effect);
                state.phase = Phase::AwaitingTarget(PendingAction {
                    key: key.to_string(),
                    class,
                    kind,
                });
                Ok(Resolution::AwaitingTarget)
            }
        }
    }

    /// Finish a pending movement by moving to `pos`.
    pub fn confirm_cell(state: &mut MatchState, pos: Pos) -> Result<ActionClass, ActionError> {
        let class = match state.pending() {
            None => return reject(ActionError::NothingPending),
            Some(PendingAction {
                kind: PendingKind::Move { cells },
                class,
                ..
            }) => {
                if !cells.contains(&pos) {
                    return reject(ActionError::InvalidCell(pos));
                }
                *class
            }
            Some(_) => return reject(ActionError::WrongSelection),
        };

        let actor = state.active_mut();
        debug!(actor = %actor.id, from = %actor.pos, to = %pos, "moved");
        actor.pos = pos;
        state.phase = Phase::AwaitingSelection;
        Ok(class)
    }

    /// Finish a pending attack or heal on `targets`.
    pub fn confirm_targets(
        state: &mut MatchState,
        config: &MatchConfig,
        targets: &[CharacterId],
    ) -> Result<(ActionClass, Vec<Hit>), ActionError> {
        let Some(pending) = state.pending().cloned() else {
            return reject(ActionError::NothingPending);
        };
        let actor_id = state.active_id();

        let hits: Vec<Hit> = match pending.kind {
            PendingKind::Move { .. } => return reject(ActionError::WrongSelection),
            PendingKind::Attack {
                magnitude,
                candidates,
                max_targets,
            } => {
                if !validate_choice(&candidates, targets, max_targets) {
                    return reject(ActionError::InvalidTargets);
                }
                let edge = Self::take_edge(state, actor_id);
                targets
                    .iter()
                    .filter_map(|&target| Self::land_hit(state, actor_id, target, magnitude + edge))
                    .collect()
            }
            PendingKind::Heal {
                amount,
                candidates,
                max_targets,
            } => {
                if !validate_choice(&candidates, targets, max_targets) {
                    return reject(ActionError::InvalidTargets);
                }
                targets
                    .iter()
                    .filter_map(|&target| {
                        let character = state.character_mut(target)?;
                        let restored = character.heal(amount, config.clamp_heal);
                        debug!(healer = %actor_id, %target, restored, hp = character.hp, "healed");
                        Some(Hit {
                            target,
                            amount: restored,
                            defeated: false,
                        })
                    })
                    .collect()
            }
        };

        state.phase = Phase::AwaitingSelection;
        Ok((pending.class, hits))
    }

    /// Abandon the pending targeted action. No slot is spent; immediate
    /// effects and the cooldown stay.
    pub fn cancel(state: &mut MatchState) -> Result<(), ActionError> {
        match state.pending() {
            None => reject(ActionError::NothingPending),
            Some(pending) => {
                debug!(actor = %state.active_id(), key = %pending.key, "targeted action cancelled");
                state.phase = Phase::AwaitingSelection;
                Ok(())
            }
        }
    }

    /// Resolve one immediate effect for `actor`.
    pub fn apply_immediate(state: &mut MatchState, actor: CharacterId, effect: &Effect) {
        match effect {
            Effect::Shield { amount } => {
                if let Some(c) = state.character_mut(actor) {
                    c.shield += amount;
                    debug!(%actor, shield = c.shield, "shield raised");
                }
            }
            Effect::Advantage => {
                if let Some(c) = state.character_mut(actor) {
                    c.advantage = true;
                }
            }
            Effect::Disadvantage => {
                if let Some(c) = state.character_mut(actor) {
                    c.disadvantage = true;
                }
            }
            Effect::AttackBonus { amount } => {
                if let Some(c) = state.character_mut(actor) {
                    c.attack_bonus += amount;
                }
            }
            Effect::MoveBonus { amount } => {
                if let Some(c) = state.character_mut(actor) {
                    c.move_bonus += amount;
                }
            }
            Effect::Status {
                name,
                value,
                duration,
            } => {
                if let Some(c) = state.character_mut(actor) {
                    c.apply_status(name.clone(), *value, *duration);
                    debug!(%actor, status = %name, value, duration, "status applied");
                }
            }
            Effect::Push { tiles } => Self::displace(state, actor, *tiles),
            Effect::Pull { tiles } => Self::displace(state, actor, -*tiles),
            Effect::Destroy => {
                if let Some(pos) = state.character(actor).map(|c| c.pos) {
                    let cleared = state.board.clear_obstacle(pos);
                    debug!(%actor, %pos, cleared, "destroy");
                }
            }
            Effect::Pierce { damage } => {
                let Some(origin) = state.character(actor).map(|c| c.pos) else {
                    return;
                };
                let probe = origin.offset(1, 0);
                match state.occupant(probe) {
                    Some(victim) => {
                        let amount = damage.evaluate(&mut state.rng);
                        let edge = Self::take_edge(state, actor);
                        Self::land_hit(state, actor, victim, amount + edge);
                    }
                    None => debug!(%actor, %probe, "pierce hit nothing"),
                }
            }
            Effect::Movement { .. } | Effect::Attack { .. } | Effect::Heal { .. } => {}
        }
    }

    /// Displace the first enemy of `actor` along the dominant axis of their
    /// offset. Positive `tiles` push away, negative pull closer. Ties go to
    /// the y axis. The result is not bounds-checked.
    fn displace(state: &mut MatchState, actor: CharacterId, tiles: i32) {
        let Some(origin) = state.character(actor).map(|c| c.pos) else {
            return;
        };
        let Some(enemy_id) = first_enemy(state, actor) else {
            debug!(%actor, "no enemy to displace");
            return;
        };
        let Some(enemy) = state.character_mut(enemy_id) else {
            return;
        };
        let dx = enemy.pos.x - origin.x;
        let dy = enemy.pos.y - origin.y;
        let away = |delta: i32| if delta > 0 { tiles } else { -tiles };
        let from = enemy.pos;
        if dx.abs() > dy.abs() {
            enemy.pos.x += away(dx);
        } else {
            enemy.pos.y += away(dy);
        }
        debug!(%actor, target = %enemy_id, %from, to = %enemy.pos, "displaced");
    }

    /// Roll and prepare the pending part of a targeted effect.
    fn prepare_targeted(
        state: &mut MatchState,
        config: &MatchConfig,
        actor: CharacterId,
        effect: &Effect,
    ) -> PendingKind {
        match effect {
            Effect::Movement { distance, jump } => {
                let bonus = state.active_mut().take_move_bonus();
                let rolled = distance.evaluate(&mut state.rng) + bonus;
                let reach = rolled.max(0) as u32;
                let origin = state.active().pos;
                let cells = reachable_cells(
                    &state.board,
                    origin,
                    reach,
                    *jump,
                    config.reachability,
                    |pos| state.is_free_for(actor, pos),
                );
                debug!(%actor, reach, jump, cells = cells.len(), "movement rolled");
                PendingKind::Move { cells }
            }
            Effect::Attack {
                damage,
                max_targets,
                ..
            } => {
                let bonus = state.active_mut().take_attack_bonus();
                let magnitude = damage.evaluate(&mut state.rng) + bonus;
                let candidates = Self::candidates(state, actor, effect);
                debug!(%actor, magnitude, candidates = candidates.len(), "attack rolled");
                PendingKind::Attack {
                    magnitude,
                    candidates,
                    max_targets: *max_targets,
                }
            }
            Effect::Heal {
                amount,
                max_targets,
                ..
            } => {
                let amount = amount.evaluate(&mut state.rng);
                let candidates = Self::candidates(state, actor, effect);
                debug!(%actor, amount, candidates = candidates.len(), "heal rolled");
                PendingKind::Heal {
                    amount,
                    candidates,
                    max_targets: *max_targets,
                }
            }
            _ => PendingKind::Move { cells: Vec::new() },
        }
    }

    fn candidates(
        state: &MatchState,
        actor: CharacterId,
        effect: &Effect,
    ) -> smallvec::SmallVec<[CharacterId; 4]> {
        TargetSpec::for_effect(effect)
            .map(|spec| TargetSelector::new(spec, actor).valid_targets(state))
            .unwrap_or_default()
    }

    /// Read and clear the attacker's advantage/disadvantage flags.
    fn take_edge(state: &mut MatchState, attacker: CharacterId) -> i32 {
        let Some(c) = state.character_mut(attacker) else {
            return 0;
        };
        let edge = i32::from(c.advantage) - i32::from(c.disadvantage);
        c.advantage = false;
        c.disadvantage = false;
        edge
    }

    /// Apply `amount` damage to `target` through its shield.
    fn land_hit(state: &mut MatchState, attacker: CharacterId, target: CharacterId, amount: i32) -> Option<Hit> {
        let victim = state.character_mut(target)?;
        let dealt = victim.take_damage(amount);
        debug!(%attacker, %target, rolled = amount, dealt, hp = victim.hp, "hit");
        if victim.defeated {
            tracing::info!(%target, name = %victim.name, "defeated");
        }
        Some(Hit {
            target,
            amount: dealt,
            defeated: victim.defeated,
        })
    }
}

fn reject<T>(err: ActionError) -> Result<T, ActionError> {
    debug!(%err, "command rejected");
    Err(err)
}

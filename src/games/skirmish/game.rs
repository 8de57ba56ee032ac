//! Skirmish rules engine and match builder.

use tracing::info;

use super::view::{RosterView, TurnView};
use crate::board::Pos;
use crate::characters::{Character, DataTable};
use crate::core::{ActionClass, CharacterId, Command, GameRng, MatchConfig, MatchState, PendingKind, TeamId};
use crate::effects::{ActionResolver, Resolution};
use crate::error::{ActionError, DataError};
use crate::rules::{MatchResult, Outcome, RulesEngine, Targets, TurnController};

/// The skirmish ruleset.
#[derive(Clone, Debug, Default)]
pub struct Skirmish {
    config: MatchConfig,
}

/// A character picked for a match.
#[derive(Clone, Debug)]
struct Placement {
    key: String,
    team: TeamId,
    pos: Pos,
}

impl Placement {
    fn new(key: &str, team: u8, x: i32, y: i32) -> Self {
        Self {
            key: key.to_string(),
            team: TeamId(team),
            pos: Pos::new(x, y),
        }
    }
}

/// Builder for a skirmish match.
///
/// Without any `place` call the built-in layout is used: the slime at
/// (0, 0), the ridder at (6, 4) and the boogschutter at (3, 2), each on a
/// team of its own.
pub struct SkirmishBuilder {
    table: DataTable,
    map: String,
    placements: Vec<Placement>,
    config: MatchConfig,
    roll_initiative: bool,
}

impl Default for SkirmishBuilder {
    fn default() -> Self {
        Self {
            table: DataTable::standard(),
            map: "meadow".to_string(),
            placements: Vec::new(),
            config: MatchConfig::default(),
            roll_initiative: false,
        }
    }
}

impl SkirmishBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from this table instead of the built-in one.
    #[must_use]
    pub fn data_table(mut self, table: DataTable) -> Self {
        self.table = table;
        self
    }

    /// Play on the map with this key.
    #[must_use]
    pub fn map(mut self, key: impl Into<String>) -> Self {
        self.map = key.into();
        self
    }

    /// Add a character. Turn order follows the order of `place` calls.
    #[must_use]
    pub fn place(mut self, key: impl Into<String>, team: TeamId, pos: Pos) -> Self {
        self.placements.push(Placement {
            key: key.into(),
            team,
            pos,
        });
        self
    }

    #[must_use]
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Order the roster by rolled initiative, highest first, instead of
    /// placement order. Ties keep placement order.
    #[must_use]
    pub fn roll_initiative(mut self) -> Self {
        self.roll_initiative = true;
        self
    }

    /// Build the engine and the initial match state.
    pub fn build(self, seed: u64) -> Result<(Skirmish, MatchState), DataError> {
        let board = self.table.map(&self.map)?.to_board()?;
        let placements = if self.placements.is_empty() {
            vec![
                Placement::new("slime", 0, 0, 0),
                Placement::new("ridder", 1, 6, 4),
                Placement::new("boogschutter", 2, 3, 2),
            ]
        } else {
            self.placements
        };

        let mut picked = Vec::with_capacity(placements.len());
        for (i, placement) in placements.iter().enumerate() {
            let def = self.table.character(&placement.key)?;
            if !board.is_walkable(placement.pos) {
                return Err(DataError::BlockedSpawn {
                    character: placement.key.clone(),
                    pos: placement.pos,
                });
            }
            if placements[..i].iter().any(|p| p.pos == placement.pos) {
                return Err(DataError::SharedSpawn(placement.pos));
            }
            picked.push((def, placement));
        }

        if self.roll_initiative {
            let mut rng = GameRng::new(seed).fork();
            let mut rolled: Vec<_> = picked
                .into_iter()
                .map(|entry| (entry.0.initiative.evaluate(&mut rng), entry))
                .collect();
            rolled.sort_by(|a, b| b.0.cmp(&a.0));
            picked = rolled.into_iter().map(|(_, entry)| entry).collect();
        }

        let roster: Vec<Character> = picked
            .into_iter()
            .enumerate()
            .map(|(i, (def, placement))| {
                Character::from_definition(CharacterId::from_index(i), placement.team, def, placement.pos)
            })
            .collect();

        info!(
            map = %self.map,
            characters = roster.len(),
            seed,
            "skirmish started"
        );

        let state = MatchState::new(board, roster, seed);
        Ok((Skirmish::new(self.config), state))
    }
}

impl Skirmish {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Every character, for rendering.
    #[must_use]
    pub fn roster_view(&self, state: &MatchState) -> RosterView {
        RosterView::from_state(state)
    }

    /// The active character's situation, for rendering.
    #[must_use]
    pub fn turn_view(&self, state: &MatchState) -> TurnView {
        TurnView::from_state(self, state)
    }

    /// Count the finished action and either continue, end the turn or end
    /// the match.
    fn finish_action(&self, state: &mut MatchState, class: ActionClass) -> Outcome {
        if let Some(result) = self.is_terminal(state) {
            info!(?result, "match over");
            return Outcome::MatchOver(result);
        }
        if TurnController::spend_slot(state, &self.config, class) {
            self.end_turn(state)
        } else {
            Outcome::Resolved {
                remaining_slots: state.remaining_slots(&self.config),
            }
        }
    }

    fn end_turn(&self, state: &mut MatchState) -> Outcome {
        let next = TurnController::advance_to_living(state, &self.config);
        Outcome::TurnEnded { next }
    }
}

impl RulesEngine for Skirmish {
    fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn available_actions(&self, state: &MatchState) -> Vec<String> {
        let actor = state.active();
        if state.pending().is_some() || !actor.is_alive() || self.is_terminal(state).is_some() {
            return Vec::new();
        }
        actor
            .ready_actions()
            .filter(|key| {
                actor
                    .action(key)
                    .is_some_and(|action| state.slot_available(&self.config, action.class()))
            })
            .map(str::to_string)
            .collect()
    }

    fn selectable_targets(&self, state: &MatchState) -> Targets {
        match state.pending().map(|pending| &pending.kind) {
            None => Targets::None,
            Some(PendingKind::Move { cells }) => Targets::Cells(cells.clone()),
            Some(
                PendingKind::Attack {
                    candidates,
                    max_targets,
                    ..
                }
                | PendingKind::Heal {
                    candidates,
                    max_targets,
                    ..
                },
            ) => Targets::Characters {
                candidates: candidates.clone(),
                max_targets: *max_targets,
            },
        }
    }

    fn apply(&mut self, state: &mut MatchState, command: &Command) -> Result<Outcome, ActionError> {
        if self.is_terminal(state).is_some() {
            return Err(ActionError::MatchOver);
        }

        match command {
            Command::UseAction(key) => {
                let resolution = ActionResolver::select_action(state, &self.config, key)?;
                state.record(command.clone());
                Ok(match resolution {
                    Resolution::Completed(class) => self.finish_action(state, class),
                    Resolution::AwaitingTarget => match self.is_terminal(state) {
                        // An immediate effect already decided the match.
                        Some(result) => {
                            ActionResolver::cancel(state)?;
                            info!(?result, "match over");
                            Outcome::MatchOver(result)
                        }
                        None => Outcome::AwaitingTarget,
                    },
                })
            }
            Command::SelectCell(pos) => {
                let class = ActionResolver::confirm_cell(state, *pos)?;
                state.record(command.clone());
                Ok(self.finish_action(state, class))
            }
            Command::SelectTargets(targets) => {
                let (class, hits) = ActionResolver::confirm_targets(state, &self.config, targets)?;
                state.record(command.clone());
                for hit in hits.iter().filter(|hit| hit.defeated) {
                    info!(target = %hit.target, "character defeated");
                }
                Ok(self.finish_action(state, class))
            }
            Command::Cancel => {
                ActionResolver::cancel(state)?;
                state.record(command.clone());
                Ok(Outcome::Cancelled)
            }
            Command::SkipTurn => {
                state.record(command.clone());
                Ok(self.end_turn(state))
            }
        }
    }

    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult> {
        match state.living_teams().as_slice() {
            [] => Some(MatchResult::Draw),
            [team] => Some(MatchResult::Victory(*team)),
            _ => None,
        }
    }
}

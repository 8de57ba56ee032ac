//! Property tests for the rules that must hold for any input.

use proptest::prelude::*;

use skirmish::board::reach::{reachable_bfs, reachable_radius};
use skirmish::board::{Board, Pos};
use skirmish::characters::{ActionDefinition, Character, CharacterDefinition};
use skirmish::core::{CharacterId, GameRng, MatchConfig, MatchState, TeamId};
use skirmish::dice::DiceExpr;
use skirmish::effects::Effect;
use skirmish::rules::TurnController;

fn dummy(hp: i32, cooldown: u32) -> CharacterDefinition {
    CharacterDefinition::new("dummy", "Dummy", hp).with_action(
        "special",
        ActionDefinition::new("Special")
            .with_effect(Effect::Shield { amount: 1 })
            .with_cooldown(cooldown),
    )
}

fn match_of(count: usize, cooldown: u32) -> MatchState {
    let def = dummy(10, cooldown);
    let roster = (0..count)
        .map(|i| {
            Character::from_definition(
                CharacterId::from_index(i),
                TeamId(i as u8),
                &def,
                Pos::new(i as i32, 0),
            )
        })
        .collect();
    MatchState::new(Board::new(8, 8), roster, 0)
}

fn board_with(obstacles: &[(i32, i32)]) -> Board {
    let mut rows = vec![vec![0u8; 8]; 8];
    for &(x, y) in obstacles {
        rows[y as usize][x as usize] = 1;
    }
    Board::from_rows(&rows).unwrap()
}

proptest! {
    /// Every roll lands between the expression's minimum and maximum.
    #[test]
    fn test_dice_roll_in_bounds(
        count in 0u32..20,
        sides in 1u32..20,
        modifier in -10i32..10,
        seed in any::<u64>(),
    ) {
        let expr = DiceExpr::new(count, sides, modifier).unwrap();
        let mut rng = GameRng::new(seed);
        for _ in 0..8 {
            let roll = expr.roll(&mut rng);
            prop_assert!(roll >= expr.min() && roll <= expr.max());
        }
    }

    /// Printed expressions parse back to themselves.
    #[test]
    fn test_dice_notation_parses_back(count in 0u32..50, sides in 1u32..100, modifier in -50i32..50) {
        let expr = DiceExpr::new(count, sides, modifier).unwrap();
        prop_assert_eq!(DiceExpr::parse(&expr.to_string()), Ok(expr));
    }

    /// After k boundaries the active index is k mod N and the turn number is k + 1.
    #[test]
    fn test_turn_rotation(count in 1usize..8, advances in 0usize..30) {
        let mut state = match_of(count, 1);
        let config = MatchConfig::default();
        for _ in 0..advances {
            TurnController::advance_turn(&mut state, &config);
        }
        prop_assert_eq!(state.active_id().index(), advances % count);
        prop_assert_eq!(state.turn_number as usize, advances + 1);
        prop_assert_eq!(state.slots_spent(), 0);
    }

    /// A cooldown of c hits zero after exactly c boundaries.
    #[test]
    fn test_cooldown_countdown(cooldown in 1u32..10, count in 1usize..4) {
        let mut state = match_of(count, cooldown);
        let config = MatchConfig::default();
        state.character_mut(CharacterId(0)).unwrap().start_cooldown("special");

        for _ in 0..cooldown - 1 {
            TurnController::advance_turn(&mut state, &config);
        }
        prop_assert_eq!(state.character(CharacterId(0)).unwrap().cooldown("special"), 1);
        TurnController::advance_turn(&mut state, &config);
        prop_assert_eq!(state.character(CharacterId(0)).unwrap().cooldown("special"), 0);
        TurnController::advance_turn(&mut state, &config);
        prop_assert_eq!(state.character(CharacterId(0)).unwrap().cooldown("special"), 0);
    }

    /// Movement only lands on open cells within reach, and pathfinding
    /// never offers more than the radius does.
    #[test]
    fn test_movement_landing_cells(
        obstacles in prop::collection::vec((0i32..8, 0i32..8), 0..20),
        origin in (0i32..8, 0i32..8),
        distance in 0u32..6,
        jump in 0u32..3,
    ) {
        let board = board_with(&obstacles);
        let origin = Pos::new(origin.0, origin.1);
        let radius = reachable_radius(&board, origin, distance, jump, |_| true);
        let paths = reachable_bfs(&board, origin, distance, jump, |_| true);

        for pos in &radius {
            prop_assert!(board.is_walkable(*pos));
            prop_assert!(origin.distance(*pos) <= distance + jump);
        }
        for pos in &paths {
            prop_assert!(radius.contains(pos));
        }
    }

    /// An attack deals max(0, damage - shield) and leaves the shield intact.
    #[test]
    fn test_attack_damage_formula(hp in 1i32..50, shield in 0i32..10, damage in 0i32..30) {
        let mut target = Character::from_definition(CharacterId(0), TeamId(0), &dummy(hp, 1), Pos::new(0, 0));
        target.shield = shield;

        let dealt = target.take_damage(damage);
        prop_assert_eq!(dealt, (damage - shield).max(0));
        prop_assert_eq!(target.hp, hp - dealt);
        prop_assert_eq!(target.shield, shield);
        prop_assert_eq!(target.defeated, target.hp <= 0);
    }

    /// Clamped heals never push hp past the maximum.
    #[test]
    fn test_clamped_heal(max_hp in 1i32..50, missing in 0i32..50, amount in 0i32..30) {
        let mut target = Character::from_definition(CharacterId(0), TeamId(0), &dummy(max_hp, 1), Pos::new(0, 0));
        target.hp = max_hp - missing.min(max_hp - 1);
        let before = target.hp;

        let restored = target.heal(amount, true);
        prop_assert!(target.hp <= max_hp);
        prop_assert_eq!(target.hp, before + restored);
        prop_assert_eq!(restored, amount.min(max_hp - before));
    }

    /// Heals of any sign never lower hp, so they can never leave a
    /// character at hp <= 0 without being defeated.
    #[test]
    fn test_heal_never_lowers_hp(hp in 1i32..50, amount in -40i32..40, clamp in any::<bool>()) {
        let mut target = Character::from_definition(CharacterId(0), TeamId(0), &dummy(50, 1), Pos::new(0, 0));
        target.hp = hp;

        let restored = target.heal(amount, clamp);
        prop_assert!(restored >= 0);
        prop_assert!(target.hp >= hp);
        prop_assert!(target.hp > 0 && target.is_alive());
    }
}

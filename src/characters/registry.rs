//! Data table for character and map lookup.
//!
//! The `DataTable` stores every character sheet and map a match can be
//! built from. It validates definitions on the way in, so anything that
//! made it into the table is safe to build a match from.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{ActionDefinition, CharacterDefinition, MapDefinition};
use crate::dice::{DiceExpr, Magnitude};
use crate::effects::Effect;
use crate::error::DataError;

/// On-disk layout of a data table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct DataFile {
    #[serde(default)]
    characters: Vec<CharacterDefinition>,
    #[serde(default)]
    maps: Vec<MapDefinition>,
}

/// Registry of character and map definitions.
///
/// ## Example
///
/// ```
/// use skirmish::characters::{ActionDefinition, CharacterDefinition, DataTable};
/// use skirmish::effects::Effect;
///
/// let mut table = DataTable::new();
/// table.register_character(
///     CharacterDefinition::new("golem", "Golem", 20)
///         .with_action("action1", ActionDefinition::new("Slam").with_effect(Effect::attack(4))),
/// ).unwrap();
///
/// assert_eq!(table.character("golem").unwrap().hp, 20);
/// assert!(table.character("dragon").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DataTable {
    characters: FxHashMap<String, CharacterDefinition>,
    maps: FxHashMap<String, MapDefinition>,
}

impl DataTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON of the form
    /// `{"characters": [...], "maps": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let file: DataFile = serde_json::from_str(json)?;
        let mut table = Self::new();
        for character in file.characters {
            table.register_character(character)?;
        }
        for map in file.maps {
            table.register_map(map)?;
        }
        Ok(table)
    }

    /// Serialize the table, characters and maps sorted by key.
    pub fn to_json(&self) -> Result<String, DataError> {
        let mut file = DataFile {
            characters: self.characters.values().cloned().collect(),
            maps: self.maps.values().cloned().collect(),
        };
        file.characters.sort_by(|a, b| a.key.cmp(&b.key));
        file.maps.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Register a character sheet.
    ///
    /// Rejects duplicates and sheets that fail validation.
    pub fn register_character(&mut self, def: CharacterDefinition) -> Result<(), DataError> {
        if self.characters.contains_key(&def.key) {
            return Err(DataError::DuplicateCharacter(def.key));
        }
        def.validate()?;
        self.characters.insert(def.key.clone(), def);
        Ok(())
    }

    /// Register a map. Rejects duplicates and malformed rows.
    pub fn register_map(&mut self, map: MapDefinition) -> Result<(), DataError> {
        if self.maps.contains_key(&map.key) {
            return Err(DataError::DuplicateMap(map.key));
        }
        map.to_board()?;
        self.maps.insert(map.key.clone(), map);
        Ok(())
    }

    /// Look up a character sheet.
    pub fn character(&self, key: &str) -> Result<&CharacterDefinition, DataError> {
        self.characters
            .get(key)
            .ok_or_else(|| DataError::UnknownCharacter(key.to_string()))
    }

    /// Look up a map.
    pub fn map(&self, key: &str) -> Result<&MapDefinition, DataError> {
        self.maps
            .get(key)
            .ok_or_else(|| DataError::UnknownMap(key.to_string()))
    }

    /// Number of character sheets.
    #[must_use]
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Number of maps.
    #[must_use]
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Iterate over all character sheets.
    pub fn characters(&self) -> impl Iterator<Item = &CharacterDefinition> {
        self.characters.values()
    }

    /// Iterate over all maps.
    pub fn maps(&self) -> impl Iterator<Item = &MapDefinition> {
        self.maps.values()
    }

    /// The built-in table: three characters and one map.
    ///
    /// - `slime`: ranged chip damage, a shielding heal, short random move
    /// - `ridder`: a sturdy melee fighter whose special adds a move bonus
    /// - `boogschutter`: long-range bow and a three-target multishot
    /// - `meadow`: a 7x5 field with six pillars
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        for def in standard_characters() {
            table.characters.insert(def.key.clone(), def);
        }
        let meadow = MapDefinition::new(
            "meadow",
            "Meadow Plains",
            vec![
                vec![0, 0, 0, 0, 0, 0, 0],
                vec![0, 1, 0, 1, 0, 1, 0],
                vec![0, 0, 0, 0, 0, 0, 0],
                vec![0, 1, 0, 1, 0, 1, 0],
                vec![0, 0, 0, 0, 0, 0, 0],
            ],
        );
        table.maps.insert(meadow.key.clone(), meadow);
        table
    }
}

fn dice(count: u32, sides: u32, modifier: i32) -> Magnitude {
    DiceExpr::new(count, sides, modifier).map_or(Magnitude::Flat(modifier), Magnitude::Dice)
}

fn standard_characters() -> [CharacterDefinition; 3] {
    let slime = CharacterDefinition::new("slime", "Slime", 10)
        .with_class("Slime")
        .with_rarity("Normaal")
        .with_color("#77dd77")
        .with_initiative(dice(1, 20, 0))
        .with_action(
            "action1",
            ActionDefinition::new("Slime").with_effect(Effect::attack(dice(1, 4, 0)).with_range(2)),
        )
        .with_action(
            "special",
            ActionDefinition::new("Slimey shield")
                .with_effect(Effect::heal(2))
                .with_effect(Effect::Shield { amount: 3 })
                .with_cooldown(4),
        )
        .with_action(
            "movement",
            ActionDefinition::new("Move").with_effect(Effect::movement(dice(1, 4, 0))),
        );

    let ridder = CharacterDefinition::new("ridder", "Ridder", 12)
        .with_class("Ridder")
        .with_rarity("Zeldzaam")
        .with_color("#0077b6")
        .with_initiative(dice(1, 20, -4))
        .with_action(
            "action1",
            ActionDefinition::new("Sword").with_effect(Effect::attack(dice(1, 6, 1))),
        )
        .with_action(
            "special",
            ActionDefinition::new("Swift slash")
                .with_effect(Effect::MoveBonus { amount: 2 })
                .with_effect(Effect::attack(dice(1, 4, 0)))
                .with_cooldown(5),
        )
        .with_action(
            "movement",
            ActionDefinition::new("Move").with_effect(Effect::movement(dice(1, 4, 0))),
        );

    let boogschutter = CharacterDefinition::new("boogschutter", "Boogschutter", 8)
        .with_class("Boogschutter")
        .with_rarity("Zeldzaam")
        .with_color("#e3b505")
        .with_initiative(dice(1, 6, 10))
        .with_action(
            "action1",
            ActionDefinition::new("Bow").with_effect(Effect::attack(dice(1, 6, 0)).with_range(4)),
        )
        .with_action(
            "special",
            ActionDefinition::new("Multishot")
                .with_effect(Effect::attack(dice(1, 4, 0)).with_range(3).with_max_targets(3))
                .with_cooldown(4),
        )
        .with_action(
            "movement",
            ActionDefinition::new("Move").with_effect(Effect::movement(3)),
        );

    [slime, ridder, boogschutter]
}

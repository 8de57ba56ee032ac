//! Character identification.
//!
//! Every combatant in a match has a `CharacterId`. IDs are assigned in roster
//! order when the match is built, so the ID doubles as the roster index:
//!
//! ```
//! use skirmish::core::CharacterId;
//!
//! let first = CharacterId::new(0);
//! let third = CharacterId::new(2);
//!
//! assert_eq!(first.index(), 0);
//! assert_eq!(third.index(), 2);
//! assert!(first < third);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a character within a match.
///
/// Roster order is ID order, which is also turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// Create a character ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Create the ID for the character at a roster index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CharacterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for i in [0usize, 1, 7, 255] {
            assert_eq!(CharacterId::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_ordering_follows_roster() {
        let mut ids = vec![CharacterId(3), CharacterId(0), CharacterId(2)];
        ids.sort();
        assert_eq!(ids, vec![CharacterId(0), CharacterId(2), CharacterId(3)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CharacterId(42)), "Character(42)");
    }

    #[test]
    fn test_serialization() {
        let id = CharacterId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CharacterId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

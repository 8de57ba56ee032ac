//! Team identification.
//!
//! Allies and enemies are decided by `TeamId` equality. Cosmetic attributes
//! such as token color play no part in it.

use serde::{Deserialize, Serialize};

/// Team identifier supporting up to 256 sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw team index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over the first `count` team IDs.
    ///
    /// ```
    /// use skirmish::core::TeamId;
    ///
    /// let teams: Vec<_> = TeamId::all(3).collect();
    /// assert_eq!(teams, vec![TeamId(0), TeamId(1), TeamId(2)]);
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = TeamId> {
        (0..count.min(256)).map(|i| TeamId(i as u8))
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

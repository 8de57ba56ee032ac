//! The arena grid.
//!
//! ## Coordinates
//!
//! Cells are addressed by `Pos { x, y }` with `(0, 0)` in the top-left
//! corner, `x` growing to the right and `y` growing downwards. Distance is
//! Manhattan distance everywhere.
//!
//! ## Walkability
//!
//! A `Board` only knows which cells are blocked. Occupancy by characters is a
//! property of the match, so reachability queries take an `is_free`
//! predicate supplied by the caller.

pub mod grid;
pub mod reach;

pub use grid::Board;
pub use reach::{reachable_cells, Reachability};

use serde::{Deserialize, Serialize};

/// A cell coordinate.
///
/// Signed so that displacement effects can compute positions off the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    ///
    /// ```
    /// use skirmish::board::Pos;
    ///
    /// assert_eq!(Pos::new(0, 0).distance(Pos::new(2, 3)), 5);
    /// assert_eq!(Pos::new(4, 1).distance(Pos::new(4, 1)), 0);
    /// ```
    #[must_use]
    pub const fn distance(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The position shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours.
    #[must_use]
    pub const fn neighbours(self) -> [Pos; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Pos::new(-2, 5);
        let b = Pos::new(3, 1);
        assert_eq!(a.distance(b), 9);
        assert_eq!(b.distance(a), 9);
    }

    #[test]
    fn test_neighbours() {
        let n = Pos::new(1, 1).neighbours();
        assert!(n.iter().all(|p| p.distance(Pos::new(1, 1)) == 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Pos::new(3, -1).to_string(), "(3, -1)");
    }
}

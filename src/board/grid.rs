//! Board dimensions and obstacles.

use serde::{Deserialize, Serialize};

use super::Pos;
use crate::error::BoardError;

/// A rectangular grid of open and blocked cells.
///
/// ## Example
///
/// ```
/// use skirmish::board::{Board, Pos};
///
/// let board = Board::from_rows(&[
///     vec![0, 0, 0],
///     vec![0, 1, 0],
/// ]).unwrap();
///
/// assert_eq!((board.width(), board.height()), (3, 2));
/// assert!(board.is_walkable(Pos::new(0, 1)));
/// assert!(!board.is_walkable(Pos::new(1, 1)));
/// assert!(!board.is_walkable(Pos::new(3, 0)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u32,
    height: u32,
    /// Row-major, `true` for obstacle cells.
    blocked: Vec<bool>,
}

impl Board {
    /// Create an open board with no obstacles.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Build a board from rows of cell codes: `0` is open, `1` is an obstacle.
    ///
    /// Every row must have the same non-zero length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }

        let mut blocked = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BoardError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &code) in row.iter().enumerate() {
                match code {
                    0 => blocked.push(false),
                    1 => blocked.push(true),
                    other => {
                        return Err(BoardError::InvalidCell {
                            x,
                            y,
                            code: other,
                        })
                    }
                }
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            blocked,
        })
    }

    /// Clear the obstacle on a cell.
    ///
    /// Returns true when an obstacle was actually removed.
    pub fn clear_obstacle(&mut self, pos: Pos) -> bool {
        match self.index(pos) {
            Some(i) if self.blocked[i] => {
                self.blocked[i] = false;
                true
            }
            _ => false,
        }
    }

    /// Board width in cells.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height in cells.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Is `pos` on the board?
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Is `pos` an obstacle cell on the board?
    #[must_use]
    pub fn is_blocked(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|i| self.blocked[i])
    }

    /// Is `pos` on the board and free of obstacles?
    #[must_use]
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|i| !self.blocked[i])
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub fn distance(&self, a: Pos, b: Pos) -> u32 {
        a.distance(b)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Pos::new(x, y)))
    }

    /// Rows of cell codes, the inverse of [`Board::from_rows`].
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.blocked
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|&b| u8::from(b)).collect())
            .collect()
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meadow() -> Board {
        Board::from_rows(&[
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 1, 0, 1, 0, 1, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 1, 0, 1, 0, 1, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_from_rows() {
        let board = meadow();
        assert_eq!(board.width(), 7);
        assert_eq!(board.height(), 5);
        assert!(board.is_blocked(Pos::new(1, 1)));
        assert!(board.is_walkable(Pos::new(2, 1)));
        assert_eq!(board.cells().filter(|&p| board.is_blocked(p)).count(), 6);
    }

    #[test]
    fn test_out_of_bounds() {
        let board = meadow();
        for pos in [Pos::new(-1, 0), Pos::new(0, -1), Pos::new(7, 0), Pos::new(0, 5)] {
            assert!(!board.contains(pos));
            assert!(!board.is_walkable(pos));
            assert!(!board.is_blocked(pos));
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Board::from_rows(&[]), Err(BoardError::Empty));
        assert_eq!(Board::from_rows(&[vec![]]), Err(BoardError::Empty));
    }

    #[test]
    fn test_ragged_rejected() {
        let err = Board::from_rows(&[vec![0, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_invalid_code_rejected() {
        let err = Board::from_rows(&[vec![0, 2]]).unwrap_err();
        assert_eq!(err, BoardError::InvalidCell { x: 1, y: 0, code: 2 });
    }

    #[test]
    fn test_clear_obstacle() {
        let mut board = meadow();
        assert!(board.clear_obstacle(Pos::new(1, 1)));
        assert!(board.is_walkable(Pos::new(1, 1)));
        assert!(!board.clear_obstacle(Pos::new(1, 1)));
        assert!(!board.clear_obstacle(Pos::new(0, 0)));
        assert!(!board.clear_obstacle(Pos::new(9, 9)));
    }

    #[test]
    fn test_cells_row_major() {
        let board = Board::new(2, 2);
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(
            cells,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
    }

    #[test]
    fn test_rows_round_trip() {
        let board = meadow();
        assert_eq!(Board::from_rows(&board.to_rows()).unwrap(), board);
    }
}

//! Movement reachability.
//!
//! Two modes are supported:
//!
//! - **Radius**: every open, unoccupied cell within Manhattan distance
//!   `distance + jump` of the origin. Obstacles between origin and
//!   destination are ignored.
//! - **Pathfinding**: a breadth-first search over orthogonal steps. Each step
//!   costs one unit of `distance + jump`, and stepping onto an obstacle also
//!   costs one jump unit. Obstacles can be crossed this way but never landed
//!   on. Occupied cells can be crossed but never landed on.
//!
//! Pathfinding results are always a subset of radius results.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{Board, Pos};

/// How movement destinations are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reachability {
    /// Manhattan radius, obstacles between cells ignored.
    #[default]
    Radius,
    /// Orthogonal paths around (or jumping over) obstacles.
    Pathfinding,
}

/// Cells a mover at `origin` may land on, in row-major order.
///
/// `is_free` reports whether the mover may end on a cell as far as other
/// characters are concerned; board walkability is checked here.
///
/// ```
/// use skirmish::board::{reachable_cells, Board, Pos, Reachability};
///
/// let board = Board::new(3, 3);
/// let cells = reachable_cells(&board, Pos::new(0, 0), 1, 0, Reachability::Radius, |_| true);
/// assert_eq!(cells, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1)]);
/// ```
pub fn reachable_cells<F>(
    board: &Board,
    origin: Pos,
    distance: u32,
    jump: u32,
    mode: Reachability,
    is_free: F,
) -> Vec<Pos>
where
    F: Fn(Pos) -> bool,
{
    match mode {
        Reachability::Radius => reachable_radius(board, origin, distance, jump, is_free),
        Reachability::Pathfinding => reachable_bfs(board, origin, distance, jump, is_free),
    }
}

/// Radius mode: open, free cells within `distance + jump`.
pub fn reachable_radius<F>(board: &Board, origin: Pos, distance: u32, jump: u32, is_free: F) -> Vec<Pos>
where
    F: Fn(Pos) -> bool,
{
    let limit = distance.saturating_add(jump);
    board
        .cells()
        .filter(|&pos| origin.distance(pos) <= limit)
        .filter(|&pos| board.is_walkable(pos) && is_free(pos))
        .collect()
}

/// Pathfinding mode: breadth-first search with obstacle jumps.
pub fn reachable_bfs<F>(board: &Board, origin: Pos, distance: u32, jump: u32, is_free: F) -> Vec<Pos>
where
    F: Fn(Pos) -> bool,
{
    let limit = distance.saturating_add(jump);
    let mut seen: FxHashSet<(Pos, u32)> = FxHashSet::default();
    let mut landed: FxHashSet<Pos> = FxHashSet::default();
    let mut queue = VecDeque::new();

    if !board.contains(origin) {
        return Vec::new();
    }

    seen.insert((origin, jump));
    queue.push_back((origin, 0u32, jump));

    while let Some((pos, steps, jumps_left)) = queue.pop_front() {
        if board.is_walkable(pos) {
            landed.insert(pos);
        }
        if steps == limit {
            continue;
        }
        for next in pos.neighbours() {
            if !board.contains(next) {
                continue;
            }
            let jumps = if board.is_blocked(next) {
                match jumps_left.checked_sub(1) {
                    Some(j) => j,
                    None => continue,
                }
            } else {
                jumps_left
            };
            if seen.insert((next, jumps)) {
                queue.push_back((next, steps + 1, jumps));
            }
        }
    }

    board
        .cells()
        .filter(|pos| landed.contains(pos) && is_free(*pos))
        .collect()
}

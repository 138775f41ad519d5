//! A single player's board: ship placement and shot resolution.

use std::cmp::{max, min};

use log::debug;

use self::grid::Grid;
pub use self::{
    coordinate::{Coordinate, ParseCoordinateError},
    errors::{CannotPlaceReason, CannotShootReason},
    grid::Cell,
};
use crate::ships::ShipClass;

mod coordinate;
mod errors;
mod grid;

/// Width and height of the square grid.
pub const GRID_SIZE: usize = 10;

/// Maximum rejection-sampling attempts before giving up on finding a random
/// placement.
#[cfg(feature = "rng_gen")]
const MAX_RANDOM_ATTEMPTS: usize = 1000;

/// Outcome of a successfully-resolved shot.
///
/// Whether a ship counts as sunk is decided from the grid alone: the shot
/// cell's direct neighbors are inspected for intact segments, and the rest of
/// the grid for any remaining ship. Ship identity is not tracked, so the
/// sunk/hit distinction is local to the shot cell rather than derived from a
/// per-ship record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The shot struck open water.
    Miss,
    /// The shot struck a ship and an adjacent segment of it is still intact.
    Hit,
    /// The shot struck a ship, no adjacent segment remains intact, and the
    /// fleet still has other ships afloat.
    Sunk,
    /// The shot struck a ship and no intact segment remains anywhere on the
    /// board. The owning player is defeated.
    Victory,
}

/// Bounding box of a validated placement run, normalized so that `lo <= hi`
/// on both axes.
#[derive(Debug, Copy, Clone)]
struct Run {
    row_lo: usize,
    row_hi: usize,
    col_lo: usize,
    col_hi: usize,
}

/// A single player's 10x10 grid and the rules that mutate it.
///
/// A board starts as open water, fills with ships during placement, and
/// collects hits and misses during the shooting phase. It is never reset. The
/// board knows nothing about its opponent; the pairing of boards is owned by
/// [`Game`][crate::game::Game].
pub struct Board {
    grid: Grid,
}

impl Board {
    /// Create a board of open water with no ships placed.
    pub fn new() -> Self {
        Self { grid: Grid::new() }
    }

    /// Place `ship` on the straight run of cells between `start` and `end`,
    /// inclusive. The endpoints may be given in either order.
    ///
    /// The run must lie fully on the grid, must be purely horizontal or
    /// purely vertical, must span exactly `ship.len()` cells, and must keep
    /// at least one cell of open water between itself and every previously
    /// placed ship, diagonals included. Validation happens before any
    /// mutation, so the grid is untouched when an error is returned.
    pub fn place_ship(
        &mut self,
        ship: ShipClass,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<(), CannotPlaceReason> {
        let run = self.validate(ship, start, end)?;
        for row in run.row_lo..=run.row_hi {
            for col in run.col_lo..=run.col_hi {
                self.grid[Coordinate::new(row, col)] = Cell::Ship;
            }
        }
        debug!("placed {} from {} to {}", ship, start, end);
        Ok(())
    }

    /// Check whether `ship` could be placed between `start` and `end`
    /// without mutating the grid.
    pub fn check_placement(
        &self,
        ship: ShipClass,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<(), CannotPlaceReason> {
        self.validate(ship, start, end).map(|_| ())
    }

    /// Run the placement rules for `ship` between `start` and `end`,
    /// returning the normalized run on success.
    fn validate(
        &self,
        ship: ShipClass,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Run, CannotPlaceReason> {
        if !start.in_bounds() || !end.in_bounds() {
            return Err(CannotPlaceReason::OutOfBounds);
        }
        // A run must vary along exactly one axis. Equal endpoints fail too:
        // no ship in the fleet is a single cell.
        if (start.row == end.row) == (start.col == end.col) {
            return Err(CannotPlaceReason::Misaligned);
        }
        let run = Run {
            row_lo: min(start.row, end.row),
            row_hi: max(start.row, end.row),
            col_lo: min(start.col, end.col),
            col_hi: max(start.col, end.col),
        };
        let actual = (run.row_hi - run.row_lo) + (run.col_hi - run.col_lo) + 1;
        if actual != ship.len() {
            return Err(CannotPlaceReason::WrongLength {
                expected: ship.len(),
                actual,
            });
        }
        // Every cell of the run's bounding box grown by one in all
        // directions must still be open water, clamped to the grid edge.
        for row in run.row_lo.saturating_sub(1)..=min(run.row_hi + 1, GRID_SIZE - 1) {
            for col in run.col_lo.saturating_sub(1)..=min(run.col_hi + 1, GRID_SIZE - 1) {
                if self.grid[Coordinate::new(row, col)] != Cell::Empty {
                    return Err(CannotPlaceReason::TooClose);
                }
            }
        }
        Ok(run)
    }

    /// Resolve a shot at `target`, marking the cell and classifying the
    /// result.
    ///
    /// A ship cell becomes [`Cell::Hit`] and an open-water cell becomes
    /// [`Cell::Miss`]. Repeat shots are not an error: shooting a cell that is
    /// already hit classifies as a hit again, and shooting a recorded miss
    /// records a miss again. An out-of-bounds target leaves the grid
    /// untouched so the caller can re-prompt without consuming a turn.
    pub fn receive_shot(&mut self, target: Coordinate) -> Result<ShotOutcome, CannotShootReason> {
        let struck = match self.grid.get_mut(target) {
            None => return Err(CannotShootReason::OutOfBounds),
            Some(cell) => match *cell {
                Cell::Ship | Cell::Hit => {
                    *cell = Cell::Hit;
                    true
                }
                Cell::Empty | Cell::Miss => {
                    *cell = Cell::Miss;
                    false
                }
            },
        };
        let outcome = if !struck {
            ShotOutcome::Miss
        } else if target
            .neighbors()
            .any(|n| self.grid.get(n) == Some(Cell::Ship))
        {
            ShotOutcome::Hit
        } else if self.has_remaining_ships() {
            ShotOutcome::Sunk
        } else {
            ShotOutcome::Victory
        };
        debug!("shot at {} resolved as {:?}", target, outcome);
        Ok(outcome)
    }

    /// Whether any intact ship segment remains anywhere on the grid.
    pub fn has_remaining_ships(&self) -> bool {
        self.grid.cells.iter().any(|&cell| cell == Cell::Ship)
    }

    /// Get the cell at the given coordinate, if it lies on the grid.
    pub fn cell(&self, coord: Coordinate) -> Option<Cell> {
        self.grid.get(coord)
    }

    /// Iterate the grid row by row. Each item is an iterator over the cells
    /// of one row, left to right. Apply [`Cell::masked`] to each cell to
    /// produce the fog-of-war view shown to the opponent.
    pub fn iter_rows<'a>(&'a self) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = Cell>> {
        (0..GRID_SIZE).map(move |row| {
            (0..GRID_SIZE).map(move |col| self.grid[Coordinate::new(row, col)])
        })
    }
}

#[cfg(feature = "rng_gen")]
impl Board {
    /// Find endpoints where `ship` can be legally placed, by rejection
    /// sampling over random orientations and starting cells. Returns `None`
    /// when the board is too crowded to find room within the attempt limit.
    pub fn random_placement<R: rand::Rng>(
        &self,
        ship: ShipClass,
        rng: &mut R,
    ) -> Option<(Coordinate, Coordinate)> {
        let len = ship.len();
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let horizontal = rng.gen::<bool>();
            let (start, end) = if horizontal {
                let row = rng.gen_range(0, GRID_SIZE);
                let col = rng.gen_range(0, GRID_SIZE - len + 1);
                (
                    Coordinate::new(row, col),
                    Coordinate::new(row, col + len - 1),
                )
            } else {
                let row = rng.gen_range(0, GRID_SIZE - len + 1);
                let col = rng.gen_range(0, GRID_SIZE);
                (
                    Coordinate::new(row, col),
                    Coordinate::new(row + len - 1, col),
                )
            };
            if self.check_placement(ship, start, end).is_ok() {
                return Some((start, end));
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

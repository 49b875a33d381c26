//! The interior a puzzle must reach.
//!
//! A `Goal` owns the target colors of the interior in row-major order,
//! the `BoardGeometry` they belong to, and the color → goal positions map that
//! both heuristics read. It is built once per search.
use std::collections::HashMap;

use crate::engine::{Board, BoardGeometry, Tile};
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Goal {
    geometry: BoardGeometry,
    tiles: Vec<Tile>,
    positions: HashMap<Tile, Vec<(usize, usize)>>,
}

impl Goal {
    /// Builds the goal for an `n x n` board from the `(n-2)^2` interior colors.
    ///
    /// # Errors
    /// - `Error::InvalidBoardDimension` if `n` is too small.
    /// - `Error::GoalSizeMismatch` if `tiles` does not cover the interior exactly.
    /// - `Error::GoalContainsBlank` if the black block appears in `tiles`.
    pub fn new(n: usize, tiles: Vec<Tile>) -> Result<Self> {
        let geometry = BoardGeometry::new(n)?;
        let expected = geometry.internal_indices().len();
        if tiles.len() != expected {
            return Err(Error::GoalSizeMismatch {
                side: geometry.interior_side(),
                expected,
                found: tiles.len(),
            });
        }
        if let Some(position) = tiles.iter().position(Tile::is_blank) {
            return Err(Error::GoalContainsBlank { position });
        }

        let mut positions: HashMap<Tile, Vec<(usize, usize)>> = HashMap::new();
        for (offset, &tile) in tiles.iter().enumerate() {
            positions
                .entry(tile)
                .or_default()
                .push(geometry.interior_position(offset));
        }

        Ok(Goal {
            geometry,
            tiles,
            positions,
        })
    }

    /// Uses the interior of `board` as the target. The black block must not
    /// sit in the interior.
    ///
    /// # Errors
    /// `Error::GoalContainsBlank` when it does.
    pub fn from_board(board: &Board) -> Result<Self> {
        let geometry = BoardGeometry::new(board.size())?;
        Self::new(board.size(), board.extract_interior(&geometry))
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Target interior colors, row-major.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Board coordinates where `tile` is wanted. Empty for colors the goal
    /// does not use (and always for `Tile::Blank`).
    pub fn positions_of(&self, tile: Tile) -> &[(usize, usize)] {
        self.positions.get(&tile).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The color wanted at interior board coordinate `(row, col)`.
    pub fn tile_at(&self, row: usize, col: usize) -> Tile {
        self.tiles[self.geometry.goal_offset(row, col)]
    }

    /// Whether the interior of `board` matches the goal exactly.
    pub fn is_satisfied_by(&self, board: &Board) -> bool {
        self.geometry
            .internal_indices()
            .iter()
            .zip(&self.tiles)
            .all(|(&index, goal_tile)| board.tiles()[index] == *goal_tile)
    }
}

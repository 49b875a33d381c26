use crate::engine::Board;
use crate::error::{Error, Result};
use crate::goal::Goal;
use std::fmt;
use std::str::FromStr;

/// The board evaluation used to rank search nodes.
///
/// Both variants score the interior submatrix only. Neither is admissible:
/// duplicated colors and the exact-cell mismatch penalty mean they may
/// overestimate the remaining moves, so solutions are not guaranteed shortest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Nearest same-color Manhattan distance plus an exact-cell mismatch
    /// penalty. See `manhattan`.
    Manhattan,
    /// Count of colored interior cells outside their color's goal positions.
    /// See `misplaced_tiles`.
    MisplacedTiles,
}

pub const HEURISTICS: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::MisplacedTiles];

impl Heuristic {
    /// Scores `board` against `goal` with this heuristic.
    pub fn evaluate(&self, board: &Board, goal: &Goal) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan(board, goal),
            Heuristic::MisplacedTiles => misplaced_tiles(board, goal),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::MisplacedTiles => write!(f, "misplaced"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "misplaced" | "misplaced-tiles" => Ok(Heuristic::MisplacedTiles),
            _ => Err(Error::ParseOption {
                option: "heuristic",
                input: s.to_string(),
                expected: "manhattan, misplaced",
            }),
        }
    }
}

/// Manhattan distance between two board coordinates.
pub fn manhattan_distance(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Counts the misplaced tiles of the interior.
///
/// An interior cell holding color `c` counts as misplaced when its coordinate
/// is not one of `c`'s goal positions. Because colors repeat, a tile sitting on
/// *any* cell that wants its color is considered in place. The black block is
/// never counted, so a board whose only interior difference is the black block
/// scores 0.
///
/// # Arguments
/// * `board`: The board to score.
/// * `goal`: The goal, carrying the precomputed color → positions map.
///
/// # Returns
/// The number of misplaced colored interior tiles.
pub fn misplaced_tiles(board: &Board, goal: &Goal) -> u32 {
    let geometry = goal.geometry();
    let mut misplaced = 0;
    for &index in geometry.internal_indices() {
        let tile = board.tiles()[index];
        if tile.is_blank() {
            continue;
        }
        let position = geometry.coordinates(index);
        if !goal.positions_of(tile).contains(&position) {
            misplaced += 1;
        }
    }
    misplaced
}

/// Computes the hybrid Manhattan score of the interior.
///
/// For every colored interior cell, adds the distance to the nearest goal
/// position of the same color (colors absent from the goal add nothing). Every
/// interior cell, the black block included, also adds 1 when its content
/// differs from the goal color at that exact coordinate.
///
/// # Arguments
/// * `board`: The board to score.
/// * `goal`: The goal, carrying the precomputed color → positions map.
///
/// # Returns
/// The summed distance plus mismatch penalties; 0 when the interior matches.
pub fn manhattan(board: &Board, goal: &Goal) -> u32 {
    let geometry = goal.geometry();
    let mut total_distance = 0;
    for &index in geometry.internal_indices() {
        let tile = board.tiles()[index];
        let (row, col) = geometry.coordinates(index);
        if !tile.is_blank() {
            let nearest = goal
                .positions_of(tile)
                .iter()
                .map(|&target| manhattan_distance((row, col), target))
                .min();
            if let Some(distance) = nearest {
                total_distance += distance;
            }
        }
        if tile != goal.tile_at(row, col) {
            total_distance += 1;
        }
    }
    total_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Board, Tile};
    use crate::utils::board_from_str_array;

    fn sample_goal() -> Goal {
        use Tile::*;
        // R R Z
        // V Z B
        // A N R
        Goal::new(5, vec![Red, Red, Blue, Green, Blue, White, Yellow, Orange, Red]).unwrap()
    }

    fn solved_board() -> Board {
        board_from_str_array(&["*VVVV", "VRRZV", "VVZBV", "VANRV", "VVVVV"]).unwrap()
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance((1, 1), (3, 3)), 4);
        assert_eq!(manhattan_distance((3, 1), (1, 2)), 3);
        assert_eq!(manhattan_distance((2, 2), (2, 2)), 0);
    }

    #[test]
    fn test_both_heuristics_are_zero_at_goal() {
        let goal = sample_goal();
        let board = solved_board();
        assert!(goal.is_satisfied_by(&board));
        assert_eq!(misplaced_tiles(&board, &goal), 0);
        assert_eq!(manhattan(&board, &goal), 0);
        for heuristic in HEURISTICS {
            assert_eq!(heuristic.evaluate(&board, &goal), 0);
        }
    }

    #[test]
    fn test_swapped_pair() {
        let goal = sample_goal();
        // (1,2) holds Z and (1,3) holds R: each is one step from a cell of its
        // color and mismatches its exact cell.
        let board = board_from_str_array(&["*VVVV", "VRZRV", "VVZBV", "VANRV", "VVVVV"]).unwrap();
        assert_eq!(misplaced_tiles(&board, &goal), 2);
        assert_eq!(manhattan(&board, &goal), 4);
    }

    #[test]
    fn test_duplicate_colors_use_nearest_goal_position() {
        let goal = sample_goal();
        // Move the red from (3,3) to (1,3) and the blue from (1,3) to (3,3).
        let moved = board_from_str_array(&["*VVVV", "VRRRV", "VVZBV", "VANZV", "VVVVV"]).unwrap();
        assert_eq!(misplaced_tiles(&moved, &goal), 2);
        // R at (1,3): nearest R is (1,2) -> 1, +1 mismatch.
        // Z at (3,3): nearest Z is (2,2) -> 2, +1 mismatch.
        assert_eq!(manhattan(&moved, &goal), 5);
    }

    #[test]
    fn test_black_block_in_interior() {
        let goal = sample_goal();
        // The red at (3,3) is swapped with the black block in the corner.
        let board = board_from_str_array(&["RVVVV", "VRRZV", "VVZBV", "VAN*V", "VVVVV"]).unwrap();
        assert!(!goal.is_satisfied_by(&board));
        assert_eq!(misplaced_tiles(&board, &goal), 0);
        assert_eq!(manhattan(&board, &goal), 1);
    }

    #[test]
    fn test_colors_missing_from_goal() {
        let goal = sample_goal();
        // The orange at (3,2) is replaced by a green, which is wanted only at (2,1).
        let board = board_from_str_array(&["*VVVV", "VRRZV", "VVZBV", "VAVRV", "VNVVV"]).unwrap();
        assert_eq!(misplaced_tiles(&board, &goal), 1);
        // Nearest green (2,1) from (3,2) is 2, plus the mismatch.
        assert_eq!(manhattan(&board, &goal), 3);
    }

    #[test]
    fn test_misplaced_is_positive_when_a_colored_tile_is_off() {
        let goal = Goal::new(3, vec![Tile::Green]).unwrap();
        let board = board_from_str_array(&["*VV", "VRV", "VVV"]).unwrap();
        assert_eq!(misplaced_tiles(&board, &goal), 1);
        // Red is not in the goal at all: no distance, only the mismatch.
        assert_eq!(manhattan(&board, &goal), 1);
    }

    #[test]
    fn test_heuristic_from_str() {
        assert_eq!("manhattan".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert_eq!("Misplaced".parse::<Heuristic>().unwrap(), Heuristic::MisplacedTiles);
        assert!("euclid".parse::<Heuristic>().is_err());
        for heuristic in HEURISTICS {
            assert_eq!(heuristic.to_string().parse::<Heuristic>().unwrap(), heuristic);
        }
    }
}

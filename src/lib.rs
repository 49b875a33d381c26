//! # Colorslide Solver Library
//!
//! This library solves framed color sliding puzzles: an `n x n` board whose
//! outer ring is a fixed frame and whose `(n-2) x (n-2)` interior must be
//! rearranged, by sliding tiles into the single black block, until it shows a
//! target color pattern. Colors repeat, so the goal is a color match, not a
//! tile-identity match.
//!
//! It is used by three binaries:
//! - `puzzle_solver`: Loads an initial board file and a goal file, then solves
//!   the puzzle with A* or IDA* and prints the moves and boards.
//! - `puzzle_generator`: Writes a random color-balanced board and a goal that
//!   is reachable from it.
//! - `heuristic_evaluator`: Runs every algorithm/heuristic pair over seeded
//!   scrambled puzzles and compares their effort.
//!
//! ## Modules
//! - `engine`: The board model (`Board`, `Tile`, `Move`, `BoardGeometry`),
//!   move legality and application, random generation and scrambling.
//! - `goal`: The interior target and its color → goal positions map.
//! - `heuristics`: The misplaced-tiles and Manhattan evaluations.
//! - `node`: Search nodes, the node arena and the open-set ordering.
//! - `solver`: A* and IDA* over a `Puzzle`, plus their reports and statistics.
//! - `utils`: Parsing and validating puzzle files, and move-string encoding.
//! - `error`: The crate's `Error` type.

pub mod engine;
pub mod error;
pub mod goal;
pub mod heuristics;
pub mod node;
pub mod solver;
pub mod utils;

pub use error::{Error, Result};

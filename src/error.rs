//! Error types for the colorslide solver.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::{Move, Tile};

/// Errors raised while building boards, loading puzzle files or applying moves.
///
/// Running out of states to search is not an error: the solvers report it as a
/// `SearchReport` without a solution.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("the board must be a square grid of at least {min}x{min}, got {rows} rows with a row of {cols} cells")]
    InvalidBoardDimension { rows: usize, cols: usize, min: usize },

    #[error("invalid color '{token}' at row {row} col {col}, must be one of V, B, R, A, N, Z, *")]
    InvalidColorToken { token: char, row: usize, col: usize },

    #[error("invalid color count: expected {expected} '{tile}' blocks, found {found} ({per_color} blocks per color and 1 black block)")]
    UnbalancedColorCount {
        tile: Tile,
        expected: usize,
        found: usize,
        per_color: usize,
    },

    #[error("a board must hold exactly one black block, found {found}")]
    InvalidBlankCount { found: usize },

    #[error("expected {expected} tiles for a {side}x{side} board, got {found}")]
    InvalidTileCount {
        side: usize,
        expected: usize,
        found: usize,
    },

    #[error("move {mv} is not legal with the black block at index {blank} on a {n}x{n} board")]
    IllegalMove { mv: Move, blank: usize, n: usize },

    #[error("goal has {found} tiles but the {side}x{side} interior needs {expected}")]
    GoalSizeMismatch {
        side: usize,
        expected: usize,
        found: usize,
    },

    #[error("goal contains the black block at interior position {position}")]
    GoalContainsBlank { position: usize },

    #[error("cannot generate a balanced {n}x{n} board: {cells} cells minus the black block is not divisible by 6")]
    UnbalanceableSize { n: usize, cells: usize },

    #[error("invalid move token '{token}' at position {position}, expected one of U, D, L, R")]
    InvalidMoveToken { token: char, position: usize },

    #[error("invalid {option} '{input}'. Expected one of: {expected}")]
    ParseOption {
        option: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

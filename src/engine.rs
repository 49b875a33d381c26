//! Board model for the framed color sliding puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Tile`: the six tile colors plus the black (blank) block.
//! - `Move`: the four sliding moves and their flat-index displacement.
//! - `BoardGeometry`: the per-size configuration (side length, interior indices,
//!   coordinate transforms) shared read-only by a whole search.
//! - `Board`: an `n x n` configuration stored as a flat row-major vector, with
//!   move generation, move application, interior projection and random
//!   generation/scrambling.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::error::{Error, Result};

/// Represents the color of a block on the board.
///
/// Each variant maps to the single-character token used in puzzle files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tile {
    /// The black block. Exactly one exists on a board and every move slides a
    /// neighbouring block into its place.
    Blank,
    /// Green block (`V`).
    Green,
    /// White block (`B`).
    White,
    /// Red block (`R`).
    Red,
    /// Yellow block (`A`).
    Yellow,
    /// Orange block (`N`).
    Orange,
    /// Blue block (`Z`).
    Blue,
}

/// The six colors, in the order used for counting and generation.
pub const COLORS: [Tile; 6] = [
    Tile::Green,
    Tile::White,
    Tile::Red,
    Tile::Yellow,
    Tile::Orange,
    Tile::Blue,
];

impl Tile {
    /// Converts the tile to its file token.
    ///
    /// # Examples
    ///
    /// ```
    /// use colorslide_solver::engine::Tile;
    /// assert_eq!(Tile::Green.to_char(), 'V');
    /// assert_eq!(Tile::Blank.to_char(), '*');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Tile::Blank => '*',
            Tile::Green => 'V',
            Tile::White => 'B',
            Tile::Red => 'R',
            Tile::Yellow => 'A',
            Tile::Orange => 'N',
            Tile::Blue => 'Z',
        }
    }

    /// Parses a file token. Returns `None` for anything outside the alphabet.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '*' => Some(Tile::Blank),
            'V' => Some(Tile::Green),
            'B' => Some(Tile::White),
            'R' => Some(Tile::Red),
            'A' => Some(Tile::Yellow),
            'N' => Some(Tile::Orange),
            'Z' => Some(Tile::Blue),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Tile::Blank
    }

    /// Returns the ANSI background code string for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Tile::Blank => "40",
            Tile::Red => "41",
            Tile::Green => "42",
            Tile::Yellow => "43",
            Tile::Blue => "44",
            Tile::White => "47",
            Tile::Orange => "48;5;208",
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Smallest supported board side: a one-cell interior inside its frame.
pub const MIN_BOARD_SIZE: usize = 3;

/// A sliding move, named after the motion of the tile that slides into the
/// black block (not the motion of the black block itself).
///
/// `Up` moves the tile below the black block upwards, so the black block ends
/// one row lower; `Left` moves the tile on its right leftwards, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// All moves in expansion order.
pub const MOVES: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

impl Move {
    /// Flat-index displacement of the black block on an `n x n` board.
    pub fn displacement(&self, n: usize) -> isize {
        let n = n as isize;
        match self {
            Move::Down => -n,
            Move::Up => n,
            Move::Right => -1,
            Move::Left => 1,
        }
    }

    /// The move that undoes this one.
    pub fn inverse(&self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    pub fn from_char(c: char) -> Option<Move> {
        match c {
            'U' => Some(Move::Up),
            'D' => Some(Move::Down),
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Returns the flat indices of the interior `(n-2) x (n-2)` submatrix in
/// ascending (row-major) order. Boards smaller than 3x3 have no interior.
///
/// # Examples
/// ```
/// use colorslide_solver::engine::internal_indices;
/// assert_eq!(internal_indices(3), vec![4]);
/// assert_eq!(internal_indices(4), vec![5, 6, 9, 10]);
/// ```
pub fn internal_indices(n: usize) -> Vec<usize> {
    if n < MIN_BOARD_SIZE {
        return Vec::new();
    }
    (1..n - 1)
        .flat_map(|row| (1..n - 1).map(move |col| row * n + col))
        .collect()
}

/// Checks whether `mv` keeps the black block at `blank` inside an `n x n` board.
pub fn is_legal_move(blank: usize, n: usize, mv: Move) -> bool {
    match mv {
        Move::Down => blank >= n,
        Move::Up => blank < n * (n - 1),
        Move::Right => blank % n != 0,
        Move::Left => blank % n != n - 1,
    }
}

/// Size-dependent configuration computed once per search.
///
/// Holds the interior index set and the coordinate transform between board
/// coordinates `(index / n, index % n)` and offsets into the interior goal
/// sequence. Both heuristics and the goal-position map go through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    n: usize,
    internal: Vec<usize>,
}

impl BoardGeometry {
    /// # Errors
    /// `Error::InvalidBoardDimension` when `n` is below `MIN_BOARD_SIZE`.
    pub fn new(n: usize) -> Result<Self> {
        if n < MIN_BOARD_SIZE {
            return Err(Error::InvalidBoardDimension {
                rows: n,
                cols: n,
                min: MIN_BOARD_SIZE,
            });
        }
        Ok(BoardGeometry {
            n,
            internal: internal_indices(n),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Side length of the interior submatrix.
    pub fn interior_side(&self) -> usize {
        self.n - 2
    }

    pub fn internal_indices(&self) -> &[usize] {
        &self.internal
    }

    /// Board coordinates `(row, col)` of a flat index.
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        (index / self.n, index % self.n)
    }

    /// Offset into the interior goal sequence of an interior board coordinate.
    pub fn goal_offset(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.interior_side() + (col - 1)
    }

    /// Inverse of `goal_offset`: board coordinates of a goal sequence offset.
    pub fn interior_position(&self, offset: usize) -> (usize, usize) {
        let side = self.interior_side();
        (offset / side + 1, offset % side + 1)
    }
}

/// An `n x n` board configuration.
///
/// Tiles are stored row-major, so the tile at `(row, col)` lives at flat index
/// `row * n + col`. The index of the black block is cached. Boards are values:
/// applying a move produces a new board and never mutates `self`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    n: usize,
    tiles: Vec<Tile>,
    blank: usize,
}

impl Board {
    /// Creates a board from a flat row-major tile vector.
    ///
    /// # Errors
    /// - `Error::InvalidBoardDimension` if `n < MIN_BOARD_SIZE`.
    /// - `Error::InvalidTileCount` if `tiles.len() != n * n`.
    /// - `Error::InvalidBlankCount` unless exactly one tile is `Tile::Blank`.
    pub fn new(n: usize, tiles: Vec<Tile>) -> Result<Self> {
        if n < MIN_BOARD_SIZE {
            return Err(Error::InvalidBoardDimension {
                rows: n,
                cols: n,
                min: MIN_BOARD_SIZE,
            });
        }
        if tiles.len() != n * n {
            return Err(Error::InvalidTileCount {
                side: n,
                expected: n * n,
                found: tiles.len(),
            });
        }
        let mut blanks = tiles.iter().enumerate().filter(|(_, t)| t.is_blank());
        let blank = match (blanks.next(), blanks.count()) {
            (Some((index, _)), 0) => index,
            (first, rest) => {
                return Err(Error::InvalidBlankCount {
                    found: first.map_or(0, |_| 1) + rest,
                })
            }
        };
        Ok(Board { n, tiles, blank })
    }

    /// Creates a color-balanced random board using a seeded `SmallRng`, so the
    /// same `(n, seed)` always yields the same board.
    ///
    /// # Errors
    /// See `Board::new_random`.
    pub fn new_random_with_seed(n: usize, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::new_random(n, &mut rng)
    }

    /// Creates a random board holding `(n*n - 1) / 6` blocks of every color and
    /// one black block, shuffled over all cells.
    ///
    /// # Errors
    /// - `Error::InvalidBoardDimension` if `n < MIN_BOARD_SIZE`.
    /// - `Error::UnbalanceableSize` if `n*n - 1` is not divisible by 6.
    pub fn new_random(n: usize, rng: &mut impl Rng) -> Result<Self> {
        if n < MIN_BOARD_SIZE {
            return Err(Error::InvalidBoardDimension {
                rows: n,
                cols: n,
                min: MIN_BOARD_SIZE,
            });
        }
        let cells = n * n;
        if (cells - 1) % COLORS.len() != 0 {
            return Err(Error::UnbalanceableSize { n, cells });
        }
        let per_color = (cells - 1) / COLORS.len();
        let mut tiles: Vec<Tile> = COLORS
            .iter()
            .flat_map(|&color| std::iter::repeat(color).take(per_color))
            .collect();
        tiles.push(Tile::Blank);
        tiles.shuffle(rng);
        Self::new(n, tiles)
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.n
    }

    /// The flat row-major tile slice.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Flat index of the black block.
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Returns the tile at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn get_tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[row * self.n + col]
    }

    /// Iterates over the moves that are legal for the current black block.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        MOVES
            .into_iter()
            .filter(move |&mv| is_legal_move(self.blank, self.n, mv))
    }

    /// Returns the board reached by `mv`, or `None` if the move is illegal.
    pub fn successor(&self, mv: Move) -> Option<Board> {
        if !is_legal_move(self.blank, self.n, mv) {
            return None;
        }
        let target = (self.blank as isize + mv.displacement(self.n)) as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Board {
            n: self.n,
            tiles,
            blank: target,
        })
    }

    /// Applies `mv`, swapping the black block with the tile it targets.
    ///
    /// # Errors
    /// `Error::IllegalMove` if the move would leave the board. Check with
    /// `is_legal_move` or iterate `legal_moves` first.
    pub fn apply_move(&self, mv: Move) -> Result<Board> {
        self.successor(mv).ok_or(Error::IllegalMove {
            mv,
            blank: self.blank,
            n: self.n,
        })
    }

    /// Applies a whole move sequence in order.
    ///
    /// # Errors
    /// `Error::IllegalMove` for the first move that cannot be applied.
    pub fn apply_moves(&self, moves: &[Move]) -> Result<Board> {
        let mut board = self.clone();
        for &mv in moves {
            board = board.apply_move(mv)?;
        }
        Ok(board)
    }

    /// Projects the board onto its interior, in row-major order.
    pub fn extract_interior(&self, geometry: &BoardGeometry) -> Vec<Tile> {
        debug_assert_eq!(geometry.size(), self.n);
        geometry
            .internal_indices()
            .iter()
            .map(|&index| self.tiles[index])
            .collect()
    }

    /// Walks the black block `steps` random legal moves away from this board,
    /// never undoing the previous move. Returns the scrambled board and the
    /// moves taken; replaying them from `self` reproduces the result.
    pub fn scramble(&self, steps: usize, rng: &mut impl Rng) -> (Board, Vec<Move>) {
        let mut board = self.clone();
        let mut moves: Vec<Move> = Vec::with_capacity(steps);
        while moves.len() < steps {
            let previous = moves.last().copied();
            let candidates: Vec<Move> = board
                .legal_moves()
                .filter(|mv| previous.map_or(true, |p| *mv != p.inverse()))
                .collect();
            let Some(&mv) = candidates.choose(rng) else {
                break;
            };
            match board.successor(mv) {
                Some(next) => {
                    board = next;
                    moves.push(mv);
                }
                None => break,
            }
        }
        (board, moves)
    }

    /// Renders the board in the puzzle file format, one row per line.
    pub fn to_plain_string(&self) -> String {
        self.tiles
            .chunks(self.n)
            .map(|row| row.iter().map(Tile::to_char).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generates a colored terminal rendering with row and column numbers.
    ///
    /// When `pos` is `Some(index)`, the cell at that flat index is marked with
    /// `..`; the solver uses it to show which tile just slid.
    pub fn to_string_with_highlight(&self, pos: Option<usize>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..self.n {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for (r_idx, row) in self.tiles.chunks(self.n).enumerate() {
            output.push_str(&format!("{:<2}", r_idx));
            for (c_idx, tile) in row.iter().enumerate() {
                let is_highlight = pos == Some(r_idx * self.n + c_idx);
                let content = if is_highlight { ".." } else { "  " };
                output.push_str(&format!(
                    "\x1b[1;{}m{}\x1b[m",
                    tile.to_ansi_color_code(),
                    content
                ));
            }
            if r_idx < self.n - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn sorted_tiles(board: &Board) -> Vec<Tile> {
        let mut tiles = board.tiles().to_vec();
        tiles.sort();
        tiles
    }

    #[test]
    fn test_tile_char_round_trip() {
        for tile in COLORS.iter().chain(std::iter::once(&Tile::Blank)) {
            assert_eq!(Tile::from_char(tile.to_char()), Some(*tile));
        }
        assert_eq!(Tile::from_char('X'), None);
        assert_eq!(Tile::from_char('v'), None);
    }

    #[test]
    fn test_internal_indices() {
        assert_eq!(internal_indices(2), Vec::<usize>::new());
        assert_eq!(internal_indices(3), vec![4]);
        assert_eq!(internal_indices(5), vec![6, 7, 8, 11, 12, 13, 16, 17, 18]);
        assert_eq!(internal_indices(7).len(), 25);
    }

    #[test]
    fn test_geometry_rejects_small_boards() {
        assert!(matches!(
            BoardGeometry::new(2),
            Err(Error::InvalidBoardDimension { rows: 2, .. })
        ));
    }

    #[test]
    fn test_geometry_coordinate_transform() {
        let geometry = BoardGeometry::new(5).unwrap();
        assert_eq!(geometry.interior_side(), 3);
        assert_eq!(geometry.coordinates(13), (2, 3));
        assert_eq!(geometry.goal_offset(1, 1), 0);
        assert_eq!(geometry.goal_offset(2, 3), 5);
        for offset in 0..9 {
            let (row, col) = geometry.interior_position(offset);
            assert_eq!(geometry.goal_offset(row, col), offset);
        }
    }

    #[test]
    fn test_legal_moves_follow_tile_motion_names() {
        // Black block in the top-left corner: nothing above it, nothing to its left.
        assert!(!is_legal_move(0, 4, Move::Down));
        assert!(!is_legal_move(0, 4, Move::Right));
        assert!(is_legal_move(0, 4, Move::Up));
        assert!(is_legal_move(0, 4, Move::Left));

        // Bottom-right corner.
        assert!(is_legal_move(15, 4, Move::Down));
        assert!(is_legal_move(15, 4, Move::Right));
        assert!(!is_legal_move(15, 4, Move::Up));
        assert!(!is_legal_move(15, 4, Move::Left));

        // Centre of a 3x3 board: every move is legal.
        assert!(MOVES.iter().all(|&mv| is_legal_move(4, 3, mv)));
    }

    #[test]
    fn test_move_displacements() {
        assert_eq!(Move::Down.displacement(5), -5);
        assert_eq!(Move::Up.displacement(5), 5);
        assert_eq!(Move::Right.displacement(5), -1);
        assert_eq!(Move::Left.displacement(5), 1);
    }

    #[test]
    fn test_board_new_validates() {
        assert!(matches!(
            Board::new(3, vec![Tile::Red; 8]),
            Err(Error::InvalidTileCount { expected: 9, found: 8, .. })
        ));
        assert!(matches!(
            Board::new(3, vec![Tile::Red; 9]),
            Err(Error::InvalidBlankCount { found: 0 })
        ));
        let mut two_blanks = vec![Tile::Red; 9];
        two_blanks[0] = Tile::Blank;
        two_blanks[8] = Tile::Blank;
        assert!(matches!(
            Board::new(3, two_blanks),
            Err(Error::InvalidBlankCount { found: 2 })
        ));
    }

    #[test]
    fn test_apply_move_swaps_and_is_reversible() {
        let board = board_from_str_array(&["VBR", "A*N", "RVZ"]).unwrap();
        assert_eq!(board.blank_index(), 4);

        for mv in MOVES {
            let moved = board.apply_move(mv).unwrap();
            assert_eq!(sorted_tiles(&moved), sorted_tiles(&board));
            let expected_blank = (4 + mv.displacement(3)) as usize;
            assert_eq!(moved.blank_index(), expected_blank);
            assert_eq!(moved.tiles()[4], board.tiles()[expected_blank]);
            assert_eq!(moved.apply_move(mv.inverse()).unwrap(), board);
        }
    }

    #[test]
    fn test_apply_move_leaves_source_board_untouched() {
        let board = board_from_str_array(&["VBR", "A*N", "RVZ"]).unwrap();
        let snapshot = board.clone();
        let _ = board.apply_move(Move::Up).unwrap();
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_apply_illegal_move_is_an_error() {
        let board = board_from_str_array(&["*BR", "AVN", "RVZ"]).unwrap();
        let err = board.apply_move(Move::Down).unwrap_err();
        assert!(matches!(
            err,
            Error::IllegalMove {
                mv: Move::Down,
                blank: 0,
                n: 3
            }
        ));
        assert!(board.successor(Move::Right).is_none());
        assert_eq!(board.legal_moves().collect::<Vec<_>>(), vec![Move::Up, Move::Left]);
    }

    #[test]
    fn test_extract_interior() {
        let board = board_from_str_array(&[
            "VVVVV", //
            "VRAZV", //
            "VBNRV", //
            "VZA*V", //
            "VVVVV",
        ])
        .unwrap();
        let geometry = BoardGeometry::new(5).unwrap();
        let interior = board.extract_interior(&geometry);
        assert_eq!(interior.len(), 9);
        assert_eq!(
            interior,
            vec![
                Tile::Red,
                Tile::Yellow,
                Tile::Blue,
                Tile::White,
                Tile::Orange,
                Tile::Red,
                Tile::Blue,
                Tile::Yellow,
                Tile::Blank,
            ]
        );
    }

    #[test]
    fn test_new_random_with_seed_is_balanced_and_deterministic() {
        let board = Board::new_random_with_seed(5, 42).unwrap();
        for color in COLORS {
            assert_eq!(board.tiles().iter().filter(|&&t| t == color).count(), 4);
        }
        assert_eq!(board.tiles().iter().filter(|t| t.is_blank()).count(), 1);
        assert_eq!(board, Board::new_random_with_seed(5, 42).unwrap());
        assert_ne!(board, Board::new_random_with_seed(5, 43).unwrap());
    }

    #[test]
    fn test_new_random_rejects_unbalanceable_size() {
        assert!(matches!(
            Board::new_random_with_seed(4, 1),
            Err(Error::UnbalanceableSize { n: 4, cells: 16 })
        ));
    }

    #[test]
    fn test_scramble_replays_from_origin() {
        let board = Board::new_random_with_seed(5, 7).unwrap();
        let mut rng = SmallRng::seed_from_u64(99);
        let (scrambled, moves) = board.scramble(12, &mut rng);
        assert_eq!(moves.len(), 12);
        for pair in moves.windows(2) {
            assert_ne!(pair[1], pair[0].inverse());
        }
        assert_eq!(board.apply_moves(&moves).unwrap(), scrambled);
    }

    #[test]
    fn test_plain_string_matches_input_rows() {
        let rows = ["VBR", "A*N", "RVZ"];
        let board = board_from_str_array(&rows).unwrap();
        assert_eq!(board.to_plain_string(), rows.join("\n"));
    }

    #[test]
    fn test_display_board_formatting() {
        let board = Board::new_random_with_seed(5, 3).unwrap();
        let display_str = format!("{}", board);
        assert!(display_str.starts_with("  0 1 2 3 4 "));
        assert_eq!(display_str.lines().count(), 6);

        let highlighted = board.to_string_with_highlight(Some(0));
        assert_eq!(highlighted.matches("..").count(), 1);
    }
}

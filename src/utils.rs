use crate::engine::{Board, Move, Tile, COLORS, MIN_BOARD_SIZE};
use crate::error::{Error, Result};
use crate::solver::Puzzle;
use std::fs;
use std::path::Path;

/// Parses rows of color tokens into a flat tile vector and its side length.
///
/// Whitespace inside a row is ignored. The grid must be square with a side of
/// at least `min_size`.
fn parse_grid(rows: &[&str], min_size: usize) -> Result<(Vec<Tile>, usize)> {
    let rows: Vec<Vec<char>> = rows
        .iter()
        .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    let side = rows.len();

    let short_or_ragged = rows.iter().find(|row| row.len() != side || row.len() < min_size);
    if side < min_size || short_or_ragged.is_some() {
        return Err(Error::InvalidBoardDimension {
            rows: side,
            cols: short_or_ragged.map_or(side, Vec::len),
            min: min_size,
        });
    }

    let mut tiles = Vec::with_capacity(side * side);
    for (r, row) in rows.iter().enumerate() {
        for (c, &token) in row.iter().enumerate() {
            let tile = Tile::from_char(token).ok_or(Error::InvalidColorToken { token, row: r, col: c })?;
            tiles.push(tile);
        }
    }
    Ok((tiles, side))
}

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0. Valid tokens are:
/// - 'V': `Tile::Green`
/// - 'B': `Tile::White`
/// - 'R': `Tile::Red`
/// - 'A': `Tile::Yellow`
/// - 'N': `Tile::Orange`
/// - 'Z': `Tile::Blue`
/// - '*': `Tile::Blank`
///
/// Colors are not required to be balanced here; see `validate_color_balance`.
///
/// # Errors
/// - `Error::InvalidBoardDimension` unless the rows form a square of side 3 or more.
/// - `Error::InvalidColorToken` for a character outside the alphabet.
/// - `Error::InvalidBlankCount` unless exactly one `*` is present.
///
/// # Examples
/// ```
/// use colorslide_solver::utils::board_from_str_array;
/// use colorslide_solver::engine::Tile;
///
/// let board = board_from_str_array(&["VBR", "A*N", "RZZ"]).unwrap();
/// assert_eq!(board.get_tile(0, 0), Tile::Green);
/// assert_eq!(board.blank_index(), 4);
///
/// assert!(board_from_str_array(&["VBR", "AXN", "RZ*"]).is_err());
/// assert!(board_from_str_array(&["V*", "BR"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board> {
    let (tiles, n) = parse_grid(s, MIN_BOARD_SIZE)?;
    Board::new(n, tiles)
}

/// Parses the goal grid of the interior: a square of color tokens with no `*`.
///
/// # Errors
/// - `Error::InvalidBoardDimension` unless the rows form a non-empty square.
/// - `Error::InvalidColorToken` for a character outside the alphabet.
/// - `Error::GoalContainsBlank` if a `*` is present.
pub fn goal_from_str_array(s: &[&str]) -> Result<Vec<Tile>> {
    let (tiles, _) = parse_grid(s, 1)?;
    if let Some(position) = tiles.iter().position(Tile::is_blank) {
        return Err(Error::GoalContainsBlank { position });
    }
    Ok(tiles)
}

/// Checks that an initial board holds `(n*n - 1) / 6` blocks of every color
/// and a single black block.
///
/// # Errors
/// `Error::UnbalancedColorCount` naming the first color whose count is off.
pub fn validate_color_balance(board: &Board) -> Result<()> {
    let n = board.size();
    let per_color = (n * n - 1) / COLORS.len();
    let expected_counts = COLORS
        .iter()
        .map(|&color| (color, per_color))
        .chain(std::iter::once((Tile::Blank, 1)));

    for (tile, expected) in expected_counts {
        let found = board.tiles().iter().filter(|&&t| t == tile).count();
        if found != expected {
            return Err(Error::UnbalancedColorCount {
                tile,
                expected,
                found,
                per_color,
            });
        }
    }
    Ok(())
}

fn read_rows(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn non_empty_lines(content: &str) -> Vec<&str> {
    content.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

/// Loads and validates the initial board file, color balance included.
///
/// # Errors
/// `Error::Io` if the file cannot be read, otherwise any error from
/// `board_from_str_array` or `validate_color_balance`.
pub fn load_initial_board(path: impl AsRef<Path>) -> Result<Board> {
    let content = read_rows(path.as_ref())?;
    let board = board_from_str_array(&non_empty_lines(&content))?;
    validate_color_balance(&board)?;
    Ok(board)
}

/// Loads the goal file holding the interior target colors.
///
/// # Errors
/// `Error::Io` if the file cannot be read, otherwise any error from
/// `goal_from_str_array`.
pub fn load_goal_board(path: impl AsRef<Path>) -> Result<Vec<Tile>> {
    let content = read_rows(path.as_ref())?;
    goal_from_str_array(&non_empty_lines(&content))
}

/// Loads both files and pairs them into a `Puzzle`.
///
/// # Errors
/// Any loading error, or `Error::GoalSizeMismatch` when the goal does not
/// cover the initial board's interior.
pub fn load_puzzle(initial_path: impl AsRef<Path>, goal_path: impl AsRef<Path>) -> Result<Puzzle> {
    let initial = load_initial_board(initial_path)?;
    let goal = load_goal_board(goal_path)?;
    Puzzle::new(initial, goal)
}

/// Encodes moves as a compact `U`/`D`/`L`/`R` string.
pub fn moves_to_string(moves: &[Move]) -> String {
    moves.iter().map(Move::to_char).collect()
}

/// Decodes a string produced by `moves_to_string`. Whitespace is ignored.
///
/// # Errors
/// `Error::InvalidMoveToken` for any other character.
pub fn parse_moves(s: &str) -> Result<Vec<Move>> {
    s.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, token)| Move::from_char(token).ok_or(Error::InvalidMoveToken { token, position }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BALANCED: [&str; 5] = ["VBRAN", "ZVBRA", "NZ*BR", "ANZVB", "RANZV"];

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&BALANCED).unwrap();
        assert_eq!(board.size(), 5);
        assert_eq!(board.get_tile(0, 0), Tile::Green);
        assert_eq!(board.get_tile(1, 0), Tile::Blue);
        assert_eq!(board.blank_index(), 12);
    }

    #[test]
    fn test_board_from_str_array_ignores_spaces() {
        let spaced = board_from_str_array(&["V B R", "A * N", "R Z Z"]).unwrap();
        let compact = board_from_str_array(&["VBR", "A*N", "RZZ"]).unwrap();
        assert_eq!(spaced, compact);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let err = board_from_str_array(&["VBR", "A*N", "RZX"]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidColorToken {
                token: 'X',
                row: 2,
                col: 2
            }
        ));
        assert!(err.to_string().contains("invalid color 'X'"));
    }

    #[test]
    fn test_board_from_str_array_too_small() {
        assert!(matches!(
            board_from_str_array(&["V*", "BR"]),
            Err(Error::InvalidBoardDimension { rows: 2, min: 3, .. })
        ));
    }

    #[test]
    fn test_board_from_str_array_ragged_rows() {
        assert!(matches!(
            board_from_str_array(&["VBR", "A*", "RZZ"]),
            Err(Error::InvalidBoardDimension { rows: 3, cols: 2, .. })
        ));
        assert!(matches!(
            board_from_str_array(&["VBRA", "A*NZ", "RZZV"]),
            Err(Error::InvalidBoardDimension { rows: 3, cols: 4, .. })
        ));
    }

    #[test]
    fn test_goal_from_str_array() {
        assert_eq!(goal_from_str_array(&["V"]).unwrap(), vec![Tile::Green]);
        assert_eq!(goal_from_str_array(&["VB", "RZ"]).unwrap().len(), 4);
        assert!(matches!(
            goal_from_str_array(&["VB", "*Z"]),
            Err(Error::GoalContainsBlank { position: 2 })
        ));
        assert!(goal_from_str_array(&[]).is_err());
    }

    #[test]
    fn test_validate_color_balance() {
        let board = board_from_str_array(&BALANCED).unwrap();
        assert!(validate_color_balance(&board).is_ok());

        // Only five colors: every blue became green.
        let rows: Vec<String> = BALANCED.iter().map(|r| r.replace('Z', "V")).collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let board = board_from_str_array(&rows).unwrap();
        let err = validate_color_balance(&board).unwrap_err();
        assert!(matches!(
            err,
            Error::UnbalancedColorCount {
                tile: Tile::Green,
                expected: 4,
                found: 8,
                per_color: 4
            }
        ));
    }

    #[test]
    fn test_load_initial_board_rejects_unbalanced_file() {
        let file = write_temp("VBRAN\nVVBRA\nNV*BR\nANVVB\nRANVV\n");
        assert!(matches!(
            load_initial_board(file.path()),
            Err(Error::UnbalancedColorCount { .. })
        ));
    }

    #[test]
    fn test_load_puzzle_from_files() {
        let initial = write_temp(&format!("{}\n\n", BALANCED.join("\n")));
        let goal = write_temp("VBR\nZNA\nRRV\n");
        let puzzle = load_puzzle(initial.path(), goal.path()).unwrap();
        assert_eq!(puzzle.initial(), &board_from_str_array(&BALANCED).unwrap());
        assert_eq!(puzzle.goal().tiles()[3], Tile::Blue);

        let wrong_goal = write_temp("VB\nZN\n");
        assert!(matches!(
            load_puzzle(initial.path(), wrong_goal.path()),
            Err(Error::GoalSizeMismatch { expected: 9, found: 4, .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_goal_board("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_moves_string_round_trip() {
        let moves = vec![Move::Up, Move::Left, Move::Down, Move::Right, Move::Up];
        let encoded = moves_to_string(&moves);
        assert_eq!(encoded, "ULDRU");
        assert_eq!(parse_moves(&encoded).unwrap(), moves);
        assert_eq!(parse_moves("U L\nD").unwrap(), vec![Move::Up, Move::Left, Move::Down]);
        assert!(matches!(
            parse_moves("UX"),
            Err(Error::InvalidMoveToken { token: 'X', position: 1 })
        ));
    }
}

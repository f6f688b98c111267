//! The 9x9 board and its validity/search primitives.

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Digit, Position};

/// A 9x9 sudoku board where each cell holds either a digit or nothing.
///
/// `Board` is a plain value: cloning it produces an independent snapshot,
/// which is how the solver engine publishes its progress without sharing
/// mutable state. All validity and search operations on it are pure.
///
/// # Examples
///
/// ```
/// use gridpace_core::{Board, Digit, Position};
///
/// let mut board = Board::new();
/// board[Position::new(0, 0)] = Some(Digit::D5);
///
/// assert_eq!(board[Position::new(0, 0)], Some(Digit::D5));
/// assert!(!board.is_valid_placement(Position::new(4, 0), Digit::D5));
/// ```
///
/// Boards can be parsed from a fixture string, one row per line, with
/// `.`, `_`, or `0` for empty cells and all whitespace ignored:
///
/// ```
/// use gridpace_core::{Board, Digit, Position};
///
/// let board: Board = "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
/// "
/// .parse()
/// .unwrap();
/// assert_eq!(board[Position::new(1, 0)], Some(Digit::D3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Digit>; 81],
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            cells: [None; 81],
        }
    }

    /// Returns `true` if placing `digit` at `pos` would not conflict with
    /// any other cell in the same row, column, or 3x3 box.
    ///
    /// The check is keyed by coordinate exclusion: every cell of the
    /// three houses is compared against `digit` except `pos` itself.
    /// Whatever `pos` currently holds is irrelevant, and `pos` is not
    /// required to be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpace_core::{Board, Digit, Position};
    ///
    /// let mut board = Board::new();
    /// board[Position::new(0, 0)] = Some(Digit::D5);
    ///
    /// // Row, column, and box conflicts:
    /// assert!(!board.is_valid_placement(Position::new(8, 0), Digit::D5));
    /// assert!(!board.is_valid_placement(Position::new(0, 8), Digit::D5));
    /// assert!(!board.is_valid_placement(Position::new(1, 1), Digit::D5));
    ///
    /// // The queried cell's own value is never a conflict:
    /// assert!(board.is_valid_placement(Position::new(0, 0), Digit::D5));
    /// ```
    #[must_use]
    pub fn is_valid_placement(&self, pos: Position, digit: Digit) -> bool {
        let value = Some(digit);

        for x in 0..9 {
            if x != pos.x() && self[Position::new(x, pos.y())] == value {
                return false;
            }
        }

        for y in 0..9 {
            if y != pos.y() && self[Position::new(pos.x(), y)] == value {
                return false;
            }
        }

        let origin = pos.box_origin();
        for y in origin.y()..origin.y() + 3 {
            for x in origin.x()..origin.x() + 3 {
                let cell = Position::new(x, y);
                if cell != pos && self[cell] == value {
                    return false;
                }
            }
        }

        true
    }

    /// Returns the first empty cell in row-major, left-to-right order, or
    /// `None` if the board is completely filled.
    ///
    /// This scan order is the backtracking order: it determines the
    /// branch order of the search and hence which solution a
    /// multi-solution puzzle resolves to.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpace_core::{Board, Position};
    ///
    /// let board = Board::new();
    /// assert_eq!(board.next_empty_cell(), Some(Position::new(0, 0)));
    /// ```
    #[must_use]
    #[inline]
    pub fn next_empty_cell(&self) -> Option<Position> {
        Position::ALL.into_iter().find(|&pos| self[pos].is_none())
    }

    /// Returns `true` if every cell is filled and no digit repeats within
    /// a row, column, or box.
    ///
    /// Each filled cell is verified by temporarily clearing it and
    /// re-running [`is_valid_placement`](Self::is_valid_placement) with
    /// its digit, so the check is exactly the rule the solver enforces
    /// during search. Intended for verification in tests and drivers; the
    /// search itself never calls it.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridpace_core::Board;
    ///
    /// assert!(!Board::new().is_complete_and_valid());
    /// ```
    #[must_use]
    pub fn is_complete_and_valid(&self) -> bool {
        let mut scratch = self.clone();
        for pos in Position::ALL {
            let Some(digit) = scratch[pos] else {
                return false;
            };
            scratch[pos] = None;
            let valid = scratch.is_valid_placement(pos, digit);
            scratch[pos] = Some(digit);
            if !valid {
                return false;
            }
        }
        true
    }
}

impl Index<Position> for Board {
    type Output = Option<Digit>;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.index()]
    }
}

impl IndexMut<Position> for Board {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.cells[pos.index()]
    }
}

/// Error returned when parsing a [`Board`] from a string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The string did not contain exactly 81 cell characters.
    #[display("expected 81 cells, found {_0}")]
    WrongCellCount(#[error(not(source))] usize),
    /// A cell character was not a digit, `.`, `_`, or `0`.
    #[display("invalid cell character {_0:?}")]
    InvalidCell(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::new();
        let mut count = 0;
        for c in s.chars() {
            if c.is_whitespace() {
                continue;
            }
            let cell = match c {
                '.' | '_' | '0' => None,
                '1'..='9' => Some(Digit::try_from(c).map_err(|_| ParseBoardError::InvalidCell(c))?),
                _ => return Err(ParseBoardError::InvalidCell(c)),
            };
            if count < 81 {
                board.cells[count] = cell;
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseBoardError::WrongCellCount(count));
        }
        Ok(board)
    }
}

impl Display for Board {
    /// Formats the board in the same fixture layout [`FromStr`] accepts:
    /// one row per line, cells in groups of three, `_` for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..9 {
            for x in 0..9 {
                if x > 0 && x % 3 == 0 {
                    write!(f, " ")?;
                }
                match self[Position::new(x, y)] {
                    Some(digit) => write!(f, "{digit}")?,
                    None => write!(f, "_")?,
                }
            }
            if y < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const PUZZLE: &str = "
        53_ _7_ ___
        6__ 195 ___
        _98 ___ _6_
        8__ _6_ __3
        4__ 8_3 __1
        7__ _2_ __6
        _6_ ___ 28_
        ___ 419 __5
        ___ _8_ _79
    ";

    const SOLUTION: &str = "
        534 678 912
        672 195 348
        198 342 567
        859 761 423
        426 853 791
        713 924 856
        961 537 284
        287 419 635
        345 286 179
    ";

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_index() {
        let board = board(PUZZLE);
        assert_eq!(board[Position::new(0, 0)], Some(Digit::D5));
        assert_eq!(board[Position::new(1, 0)], Some(Digit::D3));
        assert_eq!(board[Position::new(2, 0)], None);
        assert_eq!(board[Position::new(4, 1)], Some(Digit::D9));
        assert_eq!(board[Position::new(8, 8)], Some(Digit::D9));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Board::from_str("123"),
            Err(ParseBoardError::WrongCellCount(3))
        );
        assert_eq!(
            Board::from_str(&"1".repeat(82)),
            Err(ParseBoardError::WrongCellCount(82))
        );
        assert_eq!(
            Board::from_str(&format!("x{}", "1".repeat(80))),
            Err(ParseBoardError::InvalidCell('x'))
        );
    }

    #[test]
    fn test_display_round_trips() {
        let board = board(PUZZLE);
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
        assert!(board.to_string().starts_with("53_ _7_ ___\n"));
    }

    #[test]
    fn test_next_empty_cell_order() {
        assert_eq!(Board::new().next_empty_cell(), Some(Position::new(0, 0)));
        assert_eq!(board(SOLUTION).next_empty_cell(), None);

        // With empties at row 0 col 5 and row 3 col 2, the row-major scan
        // must report the row 0 cell first.
        let mut board = board(SOLUTION);
        board[Position::new(5, 0)] = None;
        board[Position::new(2, 3)] = None;
        assert_eq!(board.next_empty_cell(), Some(Position::new(5, 0)));

        board[Position::new(5, 0)] = Some(Digit::D7);
        assert_eq!(board.next_empty_cell(), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_placement_conflicts() {
        let mut board = Board::new();
        board[Position::new(4, 4)] = Some(Digit::D7);

        // Same row, same column, same box.
        assert!(!board.is_valid_placement(Position::new(0, 4), Digit::D7));
        assert!(!board.is_valid_placement(Position::new(4, 8), Digit::D7));
        assert!(!board.is_valid_placement(Position::new(3, 3), Digit::D7));

        // Different digit, or unrelated cell.
        assert!(board.is_valid_placement(Position::new(0, 4), Digit::D6));
        assert!(board.is_valid_placement(Position::new(0, 0), Digit::D7));

        // The queried cell's own value never conflicts with itself.
        assert!(board.is_valid_placement(Position::new(4, 4), Digit::D7));
    }

    #[test]
    fn test_is_complete_and_valid() {
        assert!(board(SOLUTION).is_complete_and_valid());
        assert!(!board(PUZZLE).is_complete_and_valid());

        // Swapping two cells within a row keeps the row valid but breaks
        // both columns.
        let mut tampered = board(SOLUTION);
        let (a, b) = (Position::new(0, 0), Position::new(1, 0));
        let swap = tampered[a];
        tampered[a] = tampered[b];
        tampered[b] = swap;
        assert!(!tampered.is_complete_and_valid());
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        proptest::collection::vec(0u8..=9, 81).prop_map(|values| {
            let mut board = Board::new();
            for (pos, value) in Position::ALL.into_iter().zip(values) {
                board[pos] = (value > 0).then(|| Digit::from_value(value));
            }
            board
        })
    }

    fn arb_position() -> impl Strategy<Value = Position> {
        (0u8..9, 0u8..9).prop_map(|(x, y)| Position::new(x, y))
    }

    fn arb_digit() -> impl Strategy<Value = Digit> {
        (1u8..=9).prop_map(Digit::from_value)
    }

    fn sees(a: Position, b: Position) -> bool {
        a.y() == b.y() || a.x() == b.x() || a.box_origin() == b.box_origin()
    }

    proptest! {
        /// Placement validity is exactly "no other cell of the three
        /// houses holds the digit".
        #[test]
        fn placement_matches_house_scan(
            board in arb_board(),
            pos in arb_position(),
            digit in arb_digit(),
        ) {
            let conflict = Position::ALL.into_iter().any(|other| {
                other != pos && sees(pos, other) && board[other] == Some(digit)
            });
            prop_assert_eq!(board.is_valid_placement(pos, digit), !conflict);
        }

        /// The queried cell's own contents never affect the result.
        #[test]
        fn placement_ignores_target_value(
            board in arb_board(),
            pos in arb_position(),
            digit in arb_digit(),
            target in proptest::option::of(arb_digit()),
        ) {
            let mut modified = board.clone();
            modified[pos] = target;
            prop_assert_eq!(
                board.is_valid_placement(pos, digit),
                modified.is_valid_placement(pos, digit),
            );
        }
    }
}

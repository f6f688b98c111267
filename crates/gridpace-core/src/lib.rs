//! Board model for the Gridpace solver.
//!
//! This crate provides the pure, side-effect-free primitives the solver
//! engine searches over: type-safe digits and positions, and a 9x9 board
//! with the validity checks and empty-cell scan that define the
//! backtracking order.
//!
//! # Overview
//!
//! - [`Digit`]: type-safe representation of sudoku digits 1-9, including
//!   the character boundary used to filter free-text cell input.
//! - [`Position`]: an (x, y) board coordinate with the canonical
//!   row-major enumeration [`Position::ALL`].
//! - [`Board`]: a 9x9 grid of optional digits with placement validity
//!   checks, the row-major empty-cell scan, and a whole-board
//!   verification helper.
//!
//! # Examples
//!
//! ```
//! use gridpace_core::{Board, Digit, Position};
//!
//! let mut board = Board::new();
//! let pos = Position::new(0, 0);
//!
//! assert!(board.is_valid_placement(pos, Digit::D5));
//! board[pos] = Some(Digit::D5);
//!
//! // The same digit is now blocked everywhere in row 0.
//! assert!(!board.is_valid_placement(Position::new(8, 0), Digit::D5));
//!
//! // The scan order is row-major, left to right.
//! assert_eq!(board.next_empty_cell(), Some(Position::new(1, 0)));
//! ```

pub use self::{
    board::{Board, ParseBoardError},
    digit::{Digit, DigitCharError},
    position::Position,
};

mod board;
mod digit;
mod position;

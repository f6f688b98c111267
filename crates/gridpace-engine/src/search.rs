//! Explicit-stack backtracking search over a board.

use gridpace_core::{Board, Digit, Position};
use tinyvec::ArrayVec;

/// One observable event produced by a [`Backtracker`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// The search began examining a new empty cell.
    ///
    /// Emitted once per descent into a cell, including when the same cell
    /// is re-entered after backtracking.
    Probing(Position),
    /// A valid candidate digit was written into the probed cell.
    Placed {
        /// The cell that was filled.
        pos: Position,
        /// The digit that was placed.
        digit: Digit,
    },
    /// A placement was reverted because no deeper branch succeeded.
    Unplaced {
        /// The cell that was cleared.
        pos: Position,
        /// The digit that had been placed there.
        digit: Digit,
    },
    /// No empty cell remains; the board holds a full solution.
    ///
    /// Terminal: further steps keep returning `Solved`.
    Solved,
    /// Every candidate of the top-level cell failed; all speculative
    /// placements have been undone and the board is back to its initial
    /// contents.
    ///
    /// Terminal: further steps keep returning `Exhausted`.
    Exhausted,
}

/// A pending cell in the search, together with the next candidate to try.
#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    pos: Position,
    /// Index into [`Digit::ALL`] of the next candidate (9 = exhausted).
    next_candidate: u8,
}

/// A depth-first backtracking search advanced one event at a time.
///
/// The recursion of the classic algorithm is rewritten as an explicit
/// stack of (cell, next-candidate) frames, so the search can be suspended
/// between any two steps without a call stack to preserve. The traversal
/// order is fixed: empty cells are visited in row-major order and
/// candidates are tried ascending 1 through 9, which pins down exactly
/// which solution a multi-solution board resolves to.
///
/// `step` mutates the internal board in place; callers that publish
/// snapshots clone [`board`](Self::board) after each mutation.
///
/// # Examples
///
/// ```
/// use gridpace_core::{Board, Position};
/// use gridpace_engine::{Backtracker, StepEvent};
///
/// let mut search = Backtracker::new(Board::new());
///
/// // The first empty cell of an empty board is the top-left corner,
/// // and the first candidate that fits is 1.
/// assert_eq!(search.step(), StepEvent::Probing(Position::new(0, 0)));
/// assert!(matches!(search.step(), StepEvent::Placed { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct Backtracker {
    board: Board,
    stack: ArrayVec<[Frame; 81]>,
    /// Whether the next step descends into a new cell (as opposed to
    /// advancing the candidates of the current one).
    descending: bool,
    outcome: Option<StepEvent>,
}

impl Backtracker {
    /// Creates a search over a working copy of `board`.
    ///
    /// Filled cells are never revisited; they act as fixed constraints
    /// whether or not they are mutually consistent.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            stack: ArrayVec::new(),
            descending: true,
            outcome: None,
        }
    }

    /// Returns the board in its current, partially solved state.
    #[must_use]
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the search and returns the board as last left by it.
    #[must_use]
    #[inline]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Returns `true` once the search has reached `Solved` or
    /// `Exhausted`.
    #[must_use]
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advances the search by one observable event.
    ///
    /// Each call performs exactly one of: descend into the next empty
    /// cell (`Probing`), write the next valid candidate (`Placed`),
    /// revert a placement after a failed branch (`Unplaced`), or finish
    /// (`Solved`/`Exhausted`). Terminal events latch; stepping a finished
    /// search returns the same event again.
    pub fn step(&mut self) -> StepEvent {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        if self.descending {
            self.descending = false;
            return match self.board.next_empty_cell() {
                Some(pos) => {
                    self.stack.push(Frame {
                        pos,
                        next_candidate: 0,
                    });
                    StepEvent::Probing(pos)
                }
                None => self.finish(StepEvent::Solved),
            };
        }

        let Some(frame) = self.stack.last_mut() else {
            return self.finish(StepEvent::Exhausted);
        };

        while frame.next_candidate < 9 {
            let digit = Digit::ALL[usize::from(frame.next_candidate)];
            frame.next_candidate += 1;
            if self.board.is_valid_placement(frame.pos, digit) {
                self.board[frame.pos] = Some(digit);
                self.descending = true;
                return StepEvent::Placed {
                    pos: frame.pos,
                    digit,
                };
            }
        }

        // Every candidate of the current cell failed: drop its frame and
        // revert the placement that led here.
        self.stack.pop();
        match self.stack.last() {
            Some(parent) => {
                let pos = parent.pos;
                let Some(digit) = self.board[pos] else {
                    unreachable!("backtracked into an empty cell at {pos}");
                };
                self.board[pos] = None;
                StepEvent::Unplaced { pos, digit }
            }
            None => self.finish(StepEvent::Exhausted),
        }
    }

    fn finish(&mut self, outcome: StepEvent) -> StepEvent {
        self.outcome = Some(outcome);
        outcome
    }
}

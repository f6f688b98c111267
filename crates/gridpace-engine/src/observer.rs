//! Outward event surface of the solver engine.
//!
//! The engine reports progress through the [`SolveObserver`] trait;
//! [`SolveEvent`] is the enum mirror of the trait for consumers that
//! prefer draining a channel over implementing callbacks, via the
//! [`SolveObserver`] impl on [`mpsc::Sender`].

use std::sync::mpsc;

use gridpace_core::{Board, Digit, Position};

use crate::SolveState;

/// The tagged delta carried by every board-change notification.
///
/// A backtracking run is fully replayable from the sequence of these
/// updates alone; the accompanying snapshot spares observers from having
/// to maintain their own board copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellUpdate {
    /// A digit was written into a previously empty cell.
    Placed {
        /// The cell that was filled.
        pos: Position,
        /// The digit that was placed.
        digit: Digit,
    },
    /// A speculative placement was reverted.
    Cleared {
        /// The cell that was emptied.
        pos: Position,
        /// The digit it previously held.
        digit: Digit,
    },
}

/// Observer of a running solve.
///
/// Callbacks are invoked on the engine's search thread, strictly in the
/// order the mutations occur; apply them in delivery order, without
/// reordering or coalescing, to render an accurate step-through.
///
/// On every [`state_changed`](Self::state_changed) notification the
/// engine's board snapshot (via
/// [`SolverEngine::board`](crate::SolverEngine::board)) is current for
/// the new state; a reset, in particular, announces only the state and
/// leaves reading the cleared board to the observer.
///
/// Observers must not call back into the engine that is notifying them;
/// control methods invoked from a callback deadlock.
pub trait SolveObserver: Send {
    /// A cell changed: called after every placement and every undo, with
    /// a full snapshot of the board and the tagged delta.
    fn board_changed(&mut self, board: &Board, update: CellUpdate);

    /// The search began examining a new empty cell (highlight feedback).
    fn probing(&mut self, pos: Position);

    /// The solve state changed, including the terminal notifications
    /// (`Solved`, or `Idle` after exhaustion or reset).
    fn state_changed(&mut self, state: SolveState);
}

/// A solve notification as a plain value.
///
/// Mirrors the [`SolveObserver`] callbacks one to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveEvent {
    /// Mirror of [`SolveObserver::board_changed`].
    BoardChanged {
        /// Snapshot of the board after the change.
        board: Board,
        /// The change itself.
        update: CellUpdate,
    },
    /// Mirror of [`SolveObserver::probing`].
    Probing(Position),
    /// Mirror of [`SolveObserver::state_changed`].
    StateChanged(SolveState),
}

/// Bridges the observer callbacks onto a channel, so a consumer can poll
/// events from its own loop instead of implementing the trait.
///
/// Send failures are ignored: a dropped receiver simply means nobody is
/// watching anymore.
impl SolveObserver for mpsc::Sender<SolveEvent> {
    fn board_changed(&mut self, board: &Board, update: CellUpdate) {
        let _ = self.send(SolveEvent::BoardChanged {
            board: board.clone(),
            update,
        });
    }

    fn probing(&mut self, pos: Position) {
        let _ = self.send(SolveEvent::Probing(pos));
    }

    fn state_changed(&mut self, state: SolveState) {
        let _ = self.send(SolveEvent::StateChanged(state));
    }
}

/// Discards every notification; useful when only the final state and
/// board are of interest.
impl SolveObserver for () {
    fn board_changed(&mut self, _board: &Board, _update: CellUpdate) {}
    fn probing(&mut self, _pos: Position) {}
    fn state_changed(&mut self, _state: SolveState) {}
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::SolverEngine;

    #[test]
    fn test_sender_observer_delivers_in_order() {
        let (tx, rx) = mpsc::channel();
        let engine = SolverEngine::new(tx);

        engine
            .start(Board::new(), Duration::ZERO)
            .expect("engine is idle");
        assert_eq!(
            engine.wait_for_settle(Duration::from_secs(30)),
            SolveState::Solved
        );

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.first(), Some(&SolveEvent::StateChanged(SolveState::Solving)));
        assert_eq!(events.last(), Some(&SolveEvent::StateChanged(SolveState::Solved)));

        // Replaying the deltas over the initial board reproduces the
        // final snapshot.
        let mut replayed = Board::new();
        for event in &events {
            match event {
                SolveEvent::BoardChanged { board, update } => {
                    match *update {
                        CellUpdate::Placed { pos, digit } => replayed[pos] = Some(digit),
                        CellUpdate::Cleared { pos, .. } => replayed[pos] = None,
                    }
                    assert_eq!(&replayed, board);
                }
                SolveEvent::Probing(_) | SolveEvent::StateChanged(_) => {}
            }
        }
        assert_eq!(replayed, engine.board());
    }
}

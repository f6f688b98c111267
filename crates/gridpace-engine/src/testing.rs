//! Test utilities for observing solves.
//!
//! [`EventLog`] is a cloneable observer that records every notification,
//! so tests and doctests can assert on the exact emission sequence of a
//! run without wiring up a channel.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use gridpace_core::Board;
//! use gridpace_engine::{SolveEvent, SolveState, SolverEngine, testing::EventLog};
//!
//! let log = EventLog::new();
//! let engine = SolverEngine::new(log.clone());
//!
//! engine.start(Board::new(), Duration::ZERO)?;
//! let _ = engine.wait_for_settle(Duration::from_secs(30));
//!
//! assert_eq!(
//!     log.events().first(),
//!     Some(&SolveEvent::StateChanged(SolveState::Solving)),
//! );
//! # Ok::<(), gridpace_engine::EngineError>(())
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use gridpace_core::{Board, Position};

use crate::{
    SolveState,
    observer::{CellUpdate, SolveEvent, SolveObserver},
};

/// An observer that records every notification it receives.
///
/// Cloning an `EventLog` shares the underlying recording: hand one clone
/// to [`SolverEngine::new`](crate::SolverEngine::new) and keep the other
/// to inspect what was emitted.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SolveEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every notification recorded so far, in delivery
    /// order.
    #[must_use]
    pub fn events(&self) -> Vec<SolveEvent> {
        self.lock().clone()
    }

    /// Returns the number of notifications recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns how many board-change notifications have been recorded.
    #[must_use]
    pub fn board_change_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|event| matches!(event, SolveEvent::BoardChanged { .. }))
            .count()
    }

    /// Discards everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SolveEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SolveObserver for EventLog {
    fn board_changed(&mut self, board: &Board, update: CellUpdate) {
        self.lock().push(SolveEvent::BoardChanged {
            board: board.clone(),
            update,
        });
    }

    fn probing(&mut self, pos: Position) {
        self.lock().push(SolveEvent::Probing(pos));
    }

    fn state_changed(&mut self, state: SolveState) {
        self.lock().push(SolveEvent::StateChanged(state));
    }
}

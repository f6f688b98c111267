//! Observable backtracking solver engine for the Gridpace board model.
//!
//! This crate turns a plain depth-first backtracking search into a
//! resumable, cancelable, observable process suitable for step-by-step
//! visualization:
//!
//! - [`Backtracker`] is the search itself, rewritten from recursion into
//!   an explicit stack so that it advances one observable step at a time.
//! - [`SolverEngine`] drives a [`Backtracker`] on a worker thread,
//!   pausing for a configurable delay after every placement and exposing
//!   the idle/solving/paused/solved control protocol.
//! - [`SolveObserver`] is the outward surface: a full board snapshot
//!   after every mutation, the currently probed cell, and every state
//!   transition, delivered strictly in search order.
//!
//! # Examples
//!
//! Solving headless, with a zero delay and a recording observer:
//!
//! ```
//! use std::time::Duration;
//!
//! use gridpace_core::Board;
//! use gridpace_engine::{SolveState, SolverEngine, testing::EventLog};
//!
//! let log = EventLog::new();
//! let engine = SolverEngine::new(log.clone());
//!
//! engine.start(Board::new(), Duration::ZERO)?;
//! assert_eq!(engine.wait_for_settle(Duration::from_secs(30)), SolveState::Solved);
//! assert!(engine.board().is_complete_and_valid());
//! # Ok::<(), gridpace_engine::EngineError>(())
//! ```

pub use self::{
    engine::{DEFAULT_STEP_DELAY, EngineError, SolveState, SolverEngine},
    observer::{CellUpdate, SolveEvent, SolveObserver},
    search::{Backtracker, StepEvent},
};

mod engine;
mod observer;
mod search;
pub mod testing;

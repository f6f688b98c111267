//! The solve controller: state machine, worker thread, and pacing.

use std::{
    fmt,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

use gridpace_core::{Board, Position};

use crate::{
    observer::{CellUpdate, SolveObserver},
    search::{Backtracker, StepEvent},
};

/// Default pacing delay between placements.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

/// Solve lifecycle state, owned exclusively by the [`SolverEngine`].
///
/// Collaborators read it to decide which controls to show; the board is
/// considered editable only while `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SolveState {
    /// No search in flight. Entered initially, after a reset, and when a
    /// search exhausts every branch without a solution.
    #[display("idle")]
    Idle,
    /// A search is running.
    #[display("solving")]
    Solving,
    /// A search is suspended; the in-progress board is retained and the
    /// search continues from it on resume.
    #[display("paused")]
    Paused,
    /// The board holds a full solution. Terminal until reset.
    #[display("solved")]
    Solved,
}

/// Error returned by [`SolverEngine::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    /// `start` was called while a previous solve was running, paused, or
    /// solved but not yet reset.
    #[display("a solve is already in progress")]
    NotIdle,
}

/// Drives a [`Backtracker`] as a resumable, cancelable, observable
/// process.
///
/// One search at a time runs on a dedicated worker thread. After every
/// placement the engine publishes a snapshot through its observer and
/// sleeps for the configured delay; `pause` and `reset` cancel an
/// in-flight delay promptly rather than waiting it out, and a pause
/// always wins a race against a concurrently expiring delay. Undo and
/// probe notifications are emitted without sleeping, so the pacing
/// throttles exactly one suspension per successful placement.
///
/// All notifications are emitted in mutation order; see
/// [`SolveObserver`] for the delivery contract.
///
/// # Resuming
///
/// `resume` does not restore a suspended call stack: it reissues a fresh
/// top-level search over the board as it stood at pause time. The cells
/// filled before the pause therefore act as fixed constraints afterwards,
/// and the search re-derives its position from the board contents alone.
///
/// # Pre-filled conflicts
///
/// `start` does not validate the supplied board. Filled cells are never
/// revisited, so a board whose givens already conflict is searched as if
/// those cells were legitimate fixed constraints: if every empty cell can
/// still be filled, the engine reports `Solved` even though the full
/// board fails [`Board::is_complete_and_valid`]. Callers that care should
/// verify the result.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use gridpace_core::Board;
/// use gridpace_engine::{SolveState, SolverEngine};
///
/// let engine = SolverEngine::new(());
/// engine.start(Board::new(), Duration::ZERO)?;
///
/// assert_eq!(engine.wait_for_settle(Duration::from_secs(30)), SolveState::Solved);
/// assert!(engine.board().is_complete_and_valid());
/// # Ok::<(), gridpace_engine::EngineError>(())
/// ```
pub struct SolverEngine {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    ctrl: Mutex<Ctrl>,
    /// Wakes delay sleeps (for prompt cancellation) and settle waiters.
    wake: Condvar,
}

struct Ctrl {
    state: SolveState,
    /// Latest published snapshot; authoritative between runs.
    board: Board,
    probe: Option<Position>,
    delay: Duration,
    /// Cooperative stop request for the current worker.
    stop: bool,
    /// Incremented per start/resume/reset so stale workers retire.
    run: u64,
    observer: Box<dyn SolveObserver>,
}

impl Shared {
    fn ctrl(&self) -> MutexGuard<'_, Ctrl> {
        self.ctrl.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SolverEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctrl = self.shared.ctrl();
        f.debug_struct("SolverEngine")
            .field("state", &ctrl.state)
            .field("probe", &ctrl.probe)
            .field("delay", &ctrl.delay)
            .finish_non_exhaustive()
    }
}

impl SolverEngine {
    /// Creates an idle engine reporting to `observer`.
    #[must_use]
    pub fn new(observer: impl SolveObserver + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                ctrl: Mutex::new(Ctrl {
                    state: SolveState::Idle,
                    board: Board::new(),
                    probe: None,
                    delay: DEFAULT_STEP_DELAY,
                    stop: false,
                    run: 0,
                    observer: Box::new(observer),
                }),
                wake: Condvar::new(),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Starts a search over a working copy of `board`, pacing placements
    /// by `delay`.
    ///
    /// Transitions `Idle` → `Solving` and notifies the observer. The
    /// board passed in should be treated as frozen by the caller until a
    /// terminal or idle state is observed; rendering during the solve
    /// must rely on the emitted snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotIdle`] unless the engine is `Idle`.
    pub fn start(&self, board: Board, delay: Duration) -> Result<(), EngineError> {
        let run = {
            let mut guard = self.shared.ctrl();
            let ctrl = &mut *guard;
            if ctrl.state != SolveState::Idle {
                return Err(EngineError::NotIdle);
            }
            ctrl.state = SolveState::Solving;
            ctrl.board = board;
            ctrl.probe = None;
            ctrl.delay = delay;
            ctrl.stop = false;
            ctrl.run += 1;
            log::debug!("solve started (run {}, delay {:?})", ctrl.run, delay);
            ctrl.observer.state_changed(SolveState::Solving);
            self.shared.wake.notify_all();
            ctrl.run
        };
        self.spawn_worker(run);
        Ok(())
    }

    /// Suspends the running search before its next placement.
    ///
    /// Transitions `Solving` → `Paused`, cancels any in-flight delay, and
    /// notifies the observer. No further notifications are emitted until
    /// [`resume`](Self::resume) or [`reset`](Self::reset). No-op in any
    /// other state.
    pub fn pause(&self) {
        let mut guard = self.shared.ctrl();
        let ctrl = &mut *guard;
        if ctrl.state != SolveState::Solving {
            return;
        }
        ctrl.state = SolveState::Paused;
        ctrl.stop = true;
        log::debug!("solve paused");
        ctrl.observer.state_changed(SolveState::Paused);
        self.shared.wake.notify_all();
    }

    /// Continues a paused search from the current board state.
    ///
    /// Transitions `Paused` → `Solving` and notifies the observer. The
    /// search is reissued over the in-progress board rather than resumed
    /// from a saved call stack; see the type-level notes. No-op in any
    /// other state.
    pub fn resume(&self) {
        let run = {
            let mut guard = self.shared.ctrl();
            let ctrl = &mut *guard;
            if ctrl.state != SolveState::Paused {
                return;
            }
            ctrl.state = SolveState::Solving;
            ctrl.stop = false;
            ctrl.run += 1;
            log::debug!("solve resumed (run {})", ctrl.run);
            ctrl.observer.state_changed(SolveState::Solving);
            self.shared.wake.notify_all();
            ctrl.run
        };
        self.spawn_worker(run);
    }

    /// Cancels any search and clears the board to empty.
    ///
    /// Transitions any non-idle state → `Idle`, cancels an in-flight
    /// delay, discards all search progress, and emits a single state
    /// notification (the cleared board is observed by re-reading
    /// [`board`](Self::board)). Calling `reset` while already `Idle`
    /// changes nothing and emits nothing.
    pub fn reset(&self) {
        let mut guard = self.shared.ctrl();
        let ctrl = &mut *guard;
        if ctrl.state == SolveState::Idle {
            return;
        }
        ctrl.state = SolveState::Idle;
        ctrl.stop = true;
        ctrl.run += 1;
        ctrl.board = Board::new();
        ctrl.probe = None;
        log::debug!("solve reset");
        ctrl.observer.state_changed(SolveState::Idle);
        self.shared.wake.notify_all();
    }

    /// Adjusts the pacing delay.
    ///
    /// Takes effect at the next placement; a delay already being slept is
    /// not shortened. The engine accepts any duration; clamping to a
    /// sensible range (a speed slider's 50-500 ms, say) is the
    /// collaborator's business.
    pub fn set_delay(&self, delay: Duration) {
        self.shared.ctrl().delay = delay;
    }

    /// Returns the current solve state.
    #[must_use]
    pub fn state(&self) -> SolveState {
        self.shared.ctrl().state
    }

    /// Returns a snapshot of the engine's current board.
    ///
    /// During a solve this is the latest published snapshot; after a
    /// terminal notification it is the final board for that run (the
    /// solution, the restored input after exhaustion, or the empty board
    /// after a reset).
    #[must_use]
    pub fn board(&self) -> Board {
        self.shared.ctrl().board.clone()
    }

    /// Returns the cell the search is currently probing, if any.
    #[must_use]
    pub fn probe(&self) -> Option<Position> {
        self.shared.ctrl().probe
    }

    /// Blocks until the state leaves `Solving`, or until `timeout`
    /// elapses, and returns the state at that point.
    ///
    /// Intended for headless drivers and tests; interactive collaborators
    /// observe transitions through their observer instead.
    #[must_use]
    pub fn wait_for_settle(&self, timeout: Duration) -> SolveState {
        let guard = self.shared.ctrl();
        let (guard, _timeout) = self
            .shared
            .wake
            .wait_timeout_while(guard, timeout, |ctrl| ctrl.state == SolveState::Solving)
            .unwrap_or_else(PoisonError::into_inner);
        guard.state
    }

    fn spawn_worker(&self, run: u64) {
        let shared = Arc::clone(&self.shared);
        let handle = thread::spawn(move || run_search(&shared, run));
        let previous = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            // A previous worker has either retired already or is about to
            // observe its stale run id.
            let _ = previous.join();
        }
    }
}

impl Drop for SolverEngine {
    fn drop(&mut self) {
        {
            let mut ctrl = self.shared.ctrl();
            ctrl.stop = true;
            ctrl.run += 1;
            self.shared.wake.notify_all();
        }
        if let Some(worker) = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            let _ = worker.join();
        }
    }
}

/// Worker loop: one search run, stepped under the control lock.
///
/// The stop flag and run id are checked before every step, and the
/// post-placement delay is a condvar wait on the same lock, so control
/// requests take effect without waiting a delay out. Once the stop flag
/// is observed the worker retires silently; the control side has already
/// published the corresponding state.
fn run_search(shared: &Shared, run: u64) {
    let mut search = {
        let ctrl = shared.ctrl();
        if ctrl.stop || ctrl.run != run {
            return;
        }
        Backtracker::new(ctrl.board.clone())
    };

    loop {
        let mut guard = shared.ctrl();
        let ctrl = &mut *guard;
        if ctrl.stop || ctrl.run != run {
            return;
        }

        let mut placed = false;
        match search.step() {
            StepEvent::Probing(pos) => {
                ctrl.probe = Some(pos);
                ctrl.observer.probing(pos);
            }
            StepEvent::Placed { pos, digit } => {
                log::trace!("placed {digit} at {pos}");
                ctrl.board = search.board().clone();
                ctrl.observer
                    .board_changed(&ctrl.board, CellUpdate::Placed { pos, digit });
                placed = true;
            }
            StepEvent::Unplaced { pos, digit } => {
                log::trace!("unplaced {digit} at {pos}");
                ctrl.board = search.board().clone();
                ctrl.observer
                    .board_changed(&ctrl.board, CellUpdate::Cleared { pos, digit });
            }
            StepEvent::Solved => {
                ctrl.state = SolveState::Solved;
                ctrl.board = search.board().clone();
                ctrl.probe = None;
                log::debug!("solve finished: solved (run {run})");
                ctrl.observer.state_changed(SolveState::Solved);
                shared.wake.notify_all();
                return;
            }
            StepEvent::Exhausted => {
                // Backtracking has already undone every speculative
                // placement, so the board is back to this run's input.
                ctrl.state = SolveState::Idle;
                ctrl.board = search.board().clone();
                ctrl.probe = None;
                log::debug!("solve finished: exhausted (run {run})");
                ctrl.observer.state_changed(SolveState::Idle);
                shared.wake.notify_all();
                return;
            }
        }

        if placed && !guard.delay.is_zero() {
            let delay = guard.delay;
            let (guard, _timeout) = shared
                .wake
                .wait_timeout_while(guard, delay, |ctrl| !ctrl.stop && ctrl.run == run)
                .unwrap_or_else(PoisonError::into_inner);
            // Whether the delay elapsed or a stop cut it short, the next
            // iteration re-checks the flags first: a pause always wins.
            drop(guard);
        }
    }
}

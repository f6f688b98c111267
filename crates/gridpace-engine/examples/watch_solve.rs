//! Example that watches the backtracking search solve a board in the
//! terminal.
//!
//! Every placement and undo prints a fresh snapshot, paced by the
//! configured delay, exactly as a graphical front end would render them.
//!
//! # Usage
//!
//! Solve the built-in classic puzzle at 50 ms per step:
//!
//! ```sh
//! cargo run --example watch_solve -- --delay-ms 50
//! ```
//!
//! Solve a custom board (81 cells; `.`, `_`, or `0` for empty, all
//! whitespace ignored):
//!
//! ```sh
//! cargo run --example watch_solve -- --board "$(cat my_puzzle.txt)"
//! ```

use std::{process, sync::mpsc, time::Duration};

use clap::Parser;
use gridpace_core::Board;
use gridpace_engine::{SolveEvent, SolveState, SolverEngine};

const CLASSIC: &str = "
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

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Delay between placements, in milliseconds.
    #[arg(long, value_name = "MILLIS", default_value_t = 50)]
    delay_ms: u64,

    /// Board to solve in fixture notation. Defaults to a classic puzzle.
    #[arg(long, value_name = "BOARD")]
    board: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match args.board.as_deref() {
        Some(s) => match s.parse::<Board>() {
            Ok(board) => board,
            Err(err) => {
                eprintln!("Invalid board: {err}");
                process::exit(2);
            }
        },
        None => CLASSIC.parse().expect("built-in puzzle parses"),
    };

    println!("Solving:");
    println!("{board}");
    println!();

    let (tx, rx) = mpsc::channel();
    let engine = SolverEngine::new(tx);
    if let Err(err) = engine.start(board, Duration::from_millis(args.delay_ms)) {
        eprintln!("Failed to start: {err}");
        process::exit(1);
    }

    for event in rx {
        match event {
            SolveEvent::BoardChanged { board, .. } => {
                println!("{board}");
                println!();
            }
            SolveEvent::Probing(pos) => log::debug!("probing {pos}"),
            SolveEvent::StateChanged(state) => match state {
                SolveState::Solved => {
                    println!("Solved!");
                    break;
                }
                SolveState::Idle => {
                    println!("No solution exists; board restored.");
                    break;
                }
                SolveState::Solving | SolveState::Paused => {}
            },
        }
    }
}

//! Move generator counts against the published perft suite.

use serde::Deserialize;

use bitboard_engine::perft::parallel_perft;
use bitboard_engine::{CalculationController, Position};

/// Counts above this many nodes only run with `--ignored`.
const QUICK_LIMIT: u64 = 500_000;

#[derive(Deserialize)]
struct Suite {
    positions: Vec<SuitePosition>,
}

#[derive(Deserialize)]
struct SuitePosition {
    name: String,
    fen: String,
    /// Expected node counts for depth 1, 2, ...
    counts: Vec<u64>,
}

fn load_suite() -> Suite {
    let data = include_str!("data/perft_suite.json");
    serde_json::from_str(data).expect("invalid perft_suite.json")
}

fn check_suite(include: impl Fn(u64) -> bool) {
    let controller = CalculationController::new();
    let mut failures = Vec::new();

    for entry in load_suite().positions {
        let pos = Position::from_fen(&entry.fen).expect("suite FEN must parse");
        for (idx, &expected) in entry.counts.iter().enumerate() {
            if !include(expected) {
                continue;
            }
            let depth = idx as u32 + 1;
            let nodes = parallel_perft(&pos, depth, &controller);
            if nodes != Some(expected) {
                failures.push(format!(
                    "{} depth {depth}: expected {expected}, got {nodes:?}",
                    entry.name
                ));
            }
        }
    }

    assert!(failures.is_empty(), "perft mismatches:\n{}", failures.join("\n"));
}

#[test]
fn perft_suite_shallow() {
    check_suite(|expected| expected <= QUICK_LIMIT);
}

#[test]
fn initial_position_every_depth() {
    let suite = load_suite();
    let entry = suite
        .positions
        .iter()
        .find(|p| p.name == "initial")
        .expect("suite has the initial position");
    let pos = Position::from_fen(&entry.fen).unwrap();
    let controller = CalculationController::new();

    for (idx, &expected) in entry.counts.iter().enumerate() {
        let depth = idx as u32 + 1;
        assert_eq!(parallel_perft(&pos, depth, &controller), Some(expected), "depth {depth}");
    }
    assert_eq!(parallel_perft(&pos, 5, &controller), Some(4_865_609));
}

#[test]
#[ignore]
fn perft_suite_deep() {
    check_suite(|expected| expected > QUICK_LIMIT);
}

#[test]
fn serial_and_parallel_counts_agree() {
    let controller = CalculationController::new();
    for entry in load_suite().positions {
        let pos = Position::from_fen(&entry.fen).unwrap();
        assert_eq!(
            Some(pos.perft(2)),
            parallel_perft(&pos, 2, &controller),
            "{}",
            entry.name
        );
    }
}

#[test]
fn fen_round_trips_for_suite_positions() {
    for entry in load_suite().positions {
        let pos = Position::from_fen(&entry.fen).unwrap();
        assert_eq!(pos.to_fen(), entry.fen);
    }
}

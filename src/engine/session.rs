//! Engine session: the live position and everything a search needs.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::board::{
    Evaluator, MaterialEvaluator, Move, Position, SearchInfoCallback, SearchLimits, SearchReport,
    Searcher,
};
use crate::perft::{parallel_divide, parallel_perft};
use crate::sync::CalculationController;
use crate::tt::TranspositionTable;

use super::config::{EngineConfig, MAX_HASH_MB};
use super::error::EngineError;

/// Worker thread stack size (32 MB)
const WORKER_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Owns the position, transposition table, calculation controller and
/// evaluator, and runs searches on a background thread.
///
/// Every command either completes on the caller's thread or hands its result
/// to a completion callback on the worker thread.
pub struct EngineSession {
    position: Position,
    tt: Arc<TranspositionTable>,
    controller: Arc<CalculationController>,
    evaluator: Arc<dyn Evaluator>,
    config: EngineConfig,
    worker: Option<JoinHandle<()>>,
}

impl EngineSession {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_evaluator(config, Arc::new(MaterialEvaluator))
    }

    #[must_use]
    pub fn with_evaluator(config: EngineConfig, evaluator: Arc<dyn Evaluator>) -> Self {
        EngineSession {
            position: Position::new(),
            tt: Arc::new(TranspositionTable::new(config.hash_mb)),
            controller: Arc::new(CalculationController::new()),
            evaluator,
            config,
            worker: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The controller shared with running calculations
    #[must_use]
    pub fn controller(&self) -> &Arc<CalculationController> {
        &self.controller
    }

    #[must_use]
    pub fn hashfull(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }

    /// Reset to the initial position and forget every cached result.
    pub fn new_game(&mut self) {
        self.stop_and_wait();
        self.position = Position::new();
        self.tt.clear();
        log::info!("new game");
    }

    /// Replace the position with `fen` (empty for the initial layout) followed
    /// by `moves` in coordinate form. Nothing changes if any part is rejected.
    pub fn set_position(&mut self, fen: &str, moves: &[&str]) -> Result<(), EngineError> {
        let mut position = if fen.trim().is_empty() {
            Position::new()
        } else {
            Position::from_fen(fen)?
        };
        for coords in moves {
            position.make_move(coords)?;
        }
        self.position = position;
        log::debug!("position set to {}", self.position.to_fen());
        Ok(())
    }

    /// Play one move given in coordinate form.
    pub fn make_move(&mut self, coords: &str) -> Result<Move, EngineError> {
        Ok(self.position.make_move(coords)?)
    }

    /// Start an iterative deepening search of the current position.
    ///
    /// Any calculation already running is stopped first. `on_info` sees each
    /// completed depth and `on_complete` receives the final report, both on
    /// the search thread.
    pub fn start_search<F>(
        &mut self,
        limits: SearchLimits,
        on_info: Option<SearchInfoCallback>,
        on_complete: F,
    ) -> Result<(), EngineError>
    where
        F: FnOnce(SearchReport) + Send + 'static,
    {
        self.stop_and_wait();

        let depth = limits.target_depth(self.config.default_depth, self.config.max_depth);
        let position = self.position;
        let tt = Arc::clone(&self.tt);
        let evaluator = Arc::clone(&self.evaluator);
        self.controller.set_time_budget(limits.movetime_ms);
        log::info!(
            "search started: depth {depth}, movetime {:?}, infinite {}",
            limits.movetime_ms,
            limits.infinite
        );

        self.spawn_worker(
            "search",
            move |controller| {
                let searcher = Searcher::new(&tt, controller, evaluator.as_ref());
                searcher.iterative_deepening(&position, depth, on_info.as_ref())
            },
            on_complete,
        )
    }

    /// Run a parallel perft on the worker thread. The count is `None` if stopped.
    pub fn start_perft<F>(&mut self, depth: u32, on_complete: F) -> Result<(), EngineError>
    where
        F: FnOnce(Option<u64>) + Send + 'static,
    {
        self.stop_and_wait();
        let position = self.position;
        self.spawn_worker(
            "perft",
            move |controller| parallel_perft(&position, depth, controller),
            on_complete,
        )
    }

    /// Parallel perft on the caller's thread. `None` if stopped from elsewhere.
    #[must_use]
    pub fn perft(&self, depth: u32) -> Option<u64> {
        parallel_perft(&self.position, depth, &self.controller)
    }

    /// Per-root-move perft counts. `None` if stopped from elsewhere.
    #[must_use]
    pub fn divide(&self, depth: u32) -> Option<Vec<(Move, u64)>> {
        parallel_divide(&self.position, depth, &self.controller)
    }

    fn spawn_worker<T, W, F>(&mut self, name: &str, work: W, on_complete: F) -> Result<(), EngineError>
    where
        T: Send + 'static,
        W: FnOnce(&CalculationController) -> T + Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        // Registered before the thread starts so an immediate stop is not lost
        self.controller.begin_calculating();
        let controller = Arc::clone(&self.controller);
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || {
                let result = work(&controller);
                controller.done_calculating();
                on_complete(result);
            });

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.controller.done_calculating();
                Err(err.into())
            }
        }
    }

    /// Ask the running calculation to stop without waiting for it.
    ///
    /// Returns false if nothing was running.
    pub fn stop(&self) -> bool {
        let running = self.controller.is_calculating();
        self.controller.stop_calculators();
        running
    }

    /// Wait for the worker thread, if any, to finish on its own.
    pub fn wait(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::warn!("worker thread panicked");
            }
        }
    }

    /// Stop the running calculation and wait for its thread.
    pub fn stop_and_wait(&mut self) {
        self.stop();
        self.wait();
    }

    #[must_use]
    pub fn is_calculating(&self) -> bool {
        self.controller.is_calculating()
    }

    /// Reallocate the transposition table. Zero disables it.
    pub fn set_hash_size(&mut self, size_mb: usize) {
        self.stop_and_wait();
        let size_mb = size_mb.min(MAX_HASH_MB);
        match Arc::get_mut(&mut self.tt) {
            Some(tt) => tt.resize(size_mb),
            None => self.tt = Arc::new(TranspositionTable::new(size_mb)),
        }
        self.config.hash_mb = size_mb;
        log::info!("hash table set to {size_mb} MB");
    }

    /// ASCII rendering of the current position
    #[must_use]
    pub fn display(&self) -> String {
        self.position.to_string()
    }
}

impl Default for EngineSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        self.stop_and_wait();
    }
}

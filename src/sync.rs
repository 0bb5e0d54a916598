//! Cooperative cancellation for long-running calculations.
//!
//! A [`CalculationController`] is shared by every worker taking part in a
//! calculation (a search thread, the perft worker pool) and by the thread
//! that wants to stop them. Workers poll [`CalculationController::need_to_stop`];
//! nothing is ever interrupted preemptively.

use std::time::Instant;

use parking_lot::RwLock;

/// Remaining milliseconds below which a time-budgeted calculation must stop.
pub const TIME_GUARD_MS: u64 = 10;

#[derive(Debug)]
struct ControllerState {
    calculators: usize,
    stop: bool,
    budget_ms: Option<u64>,
    started: Instant,
}

/// Shared stop/timeout state for concurrent calculations.
#[derive(Debug)]
pub struct CalculationController {
    state: RwLock<ControllerState>,
}

impl CalculationController {
    #[must_use]
    pub fn new() -> Self {
        CalculationController {
            state: RwLock::new(ControllerState {
                calculators: 0,
                stop: false,
                budget_ms: None,
                started: Instant::now(),
            }),
        }
    }

    /// Set the time budget for the next calculation. `None` or zero means unlimited.
    ///
    /// The clock starts when the first calculator registers.
    pub fn set_time_budget(&self, budget_ms: Option<u64>) {
        self.state.write().budget_ms = budget_ms.filter(|&ms| ms > 0);
    }

    /// Register a calculator. The first registration starts the clock.
    pub fn begin_calculating(&self) {
        let mut state = self.state.write();
        if state.calculators == 0 {
            state.started = Instant::now();
        }
        state.calculators += 1;
    }

    /// Register a calculator that unregisters itself when the guard drops.
    #[must_use = "the calculation ends when the guard is dropped"]
    pub fn begin(&self) -> CalculationGuard<'_> {
        self.begin_calculating();
        CalculationGuard { controller: self }
    }

    /// Unregister a calculator. When the last one leaves, the stop flag and
    /// the time budget are reset.
    pub fn done_calculating(&self) {
        let mut state = self.state.write();
        state.calculators = state.calculators.saturating_sub(1);
        if state.calculators == 0 {
            state.stop = false;
            state.budget_ms = None;
        }
    }

    /// True when a stop was requested or the time budget is nearly spent.
    #[must_use]
    pub fn need_to_stop(&self) -> bool {
        let state = self.state.read();
        if state.stop {
            return true;
        }
        match state.budget_ms {
            Some(budget) => {
                let elapsed = state.started.elapsed().as_millis() as u64;
                budget.saturating_sub(elapsed) < TIME_GUARD_MS
            }
            None => false,
        }
    }

    /// Ask every registered calculator to stop. Does nothing when idle.
    pub fn stop_calculators(&self) {
        let mut state = self.state.write();
        if state.calculators > 0 {
            state.stop = true;
        }
    }

    #[must_use]
    pub fn is_calculating(&self) -> bool {
        self.state.read().calculators > 0
    }
}

impl Default for CalculationController {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a calculator registered for as long as it lives.
#[derive(Debug)]
pub struct CalculationGuard<'a> {
    controller: &'a CalculationController,
}

impl Drop for CalculationGuard<'_> {
    fn drop(&mut self) {
        self.controller.done_calculating();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn idle_controller_does_not_stop() {
        let controller = CalculationController::new();
        assert!(!controller.is_calculating());
        assert!(!controller.need_to_stop());
    }

    #[test]
    fn stop_while_idle_is_ignored() {
        let controller = CalculationController::new();
        controller.stop_calculators();
        let _guard = controller.begin();
        assert!(!controller.need_to_stop());
    }

    #[test]
    fn stop_is_seen_until_last_calculator_leaves() {
        let controller = CalculationController::new();
        let first = controller.begin();
        let second = controller.begin();
        controller.stop_calculators();
        assert!(controller.need_to_stop());

        drop(first);
        assert!(controller.is_calculating());
        assert!(controller.need_to_stop());

        drop(second);
        assert!(!controller.is_calculating());
        assert!(!controller.need_to_stop());
    }

    #[test]
    fn time_budget_expires() {
        let controller = CalculationController::new();
        controller.set_time_budget(Some(20));
        let _guard = controller.begin();
        assert!(!controller.need_to_stop());
        thread::sleep(Duration::from_millis(30));
        assert!(controller.need_to_stop());
    }

    #[test]
    fn budget_is_cleared_after_calculation() {
        let controller = CalculationController::new();
        controller.set_time_budget(Some(1));
        {
            let _guard = controller.begin();
            thread::sleep(Duration::from_millis(5));
            assert!(controller.need_to_stop());
        }
        let _guard = controller.begin();
        assert!(!controller.need_to_stop());
    }

    #[test]
    fn zero_budget_means_unlimited() {
        let controller = CalculationController::new();
        controller.set_time_budget(Some(0));
        let _guard = controller.begin();
        thread::sleep(Duration::from_millis(15));
        assert!(!controller.need_to_stop());
    }

    #[test]
    fn stop_from_another_thread() {
        let controller = Arc::new(CalculationController::new());
        let worker = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                let _guard = controller.begin();
                let mut spins = 0u64;
                while !controller.need_to_stop() {
                    spins += 1;
                    thread::yield_now();
                }
                spins
            })
        };

        while !controller.is_calculating() {
            thread::yield_now();
        }
        controller.stop_calculators();
        worker.join().unwrap();
        assert!(!controller.is_calculating());
    }
}

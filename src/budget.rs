//! Cooperative solve budget.
//!
//! Solvers poll [`Budget::exhausted`] at fixed check points (once per outer
//! item iteration for table solvers, once per new memo state for top-down
//! solvers, once per bound-tightening round for primal-dual). A budget never
//! interrupts anything by itself; the solver decides how to wind down and
//! returns a `Timeout` solution.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Budget {
    start: Instant,
    time_limit: Option<Duration>,
    step_limit: Option<u64>,
    steps: u64,
    exhausted: bool,
}

impl Default for Budget {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl Budget {
    /// Start a budget now. `step_limit` is the number of check points that
    /// may pass before the budget is exhausted.
    pub fn new(time_limit: Option<Duration>, step_limit: Option<u64>) -> Self {
        Self {
            start: Instant::now(),
            time_limit,
            step_limit,
            steps: 0,
            exhausted: false,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None, None)
    }

    /// Record one check point and report whether either limit is reached.
    ///
    /// Sticky: once this returns `true` it keeps returning `true`.
    pub fn exhausted(&mut self) -> bool {
        if self.exhausted {
            return true;
        }
        if let Some(limit) = self.step_limit {
            if self.steps >= limit {
                self.exhausted = true;
                return true;
            }
        }
        self.steps = self.steps.saturating_add(1);
        if let Some(limit) = self.time_limit {
            if self.start.elapsed() >= limit {
                self.exhausted = true;
            }
        }
        self.exhausted
    }

    /// Whether a previous check point found the budget exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Remaining wall-clock time, `None` without a time limit.
    pub fn remaining(&self) -> Option<Duration> {
        self.time_limit
            .map(|limit| limit.saturating_sub(self.start.elapsed()))
    }
}

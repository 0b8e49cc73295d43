//! Search control: a shared stop flag plus soft and hard time limits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Decides when a search stops.
///
/// The hard limit aborts the running iteration; it is polled every 2048
/// nodes. The soft limit is checked between iterations only.
#[derive(Debug)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    soft_limit: Option<Duration>,
    hard_limit: Option<Duration>,
}

impl SearchControl {
    /// No time pressure; only the stop flag ends the search.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self { stopped, start: Instant::now(), soft_limit: None, hard_limit: None }
    }

    /// Clock starts immediately.
    pub fn new_timed(stopped: Arc<AtomicBool>, soft: Duration, hard: Duration) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            soft_limit: Some(soft.min(hard)),
            hard_limit: Some(hard),
        }
    }

    /// Limits derived from a single thinking budget.
    ///
    /// A new iteration is not started once 60% of the budget is gone, since
    /// it would most likely be cut off by the hard limit anyway.
    pub fn for_budget(stopped: Arc<AtomicBool>, budget: Duration) -> Self {
        Self::new_timed(stopped, budget.mul_f64(0.6), budget)
    }

    /// Whether the running iteration must abort.
    ///
    /// Once the hard limit fires the stop flag is raised, so later calls
    /// return `true` without looking at the clock.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }
        if nodes & 2047 != 0 {
            return false;
        }
        if let Some(hard) = self.hard_limit
            && self.elapsed() >= hard
        {
            self.stopped.store(true, Ordering::Release);
            return true;
        }
        false
    }

    /// Whether iterative deepening should stop before the next depth.
    pub fn should_stop_iterating(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }
        self.soft_limit.is_some_and(|soft| self.elapsed() >= soft)
    }

    /// Whether the search was stopped, by the flag or the hard limit.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}

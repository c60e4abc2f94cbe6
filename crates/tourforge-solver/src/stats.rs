//! Per-run solver statistics.

use std::time::Duration;

/// Statistics for one completed search.
///
/// What counts as a step depends on the algorithm: one city appended for
/// nearest neighbor, one permutation evaluated for brute force, one
/// generation for the genetic algorithm.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tourforge_solver::SolveStats;
///
/// let stats = SolveStats::new(500, Duration::from_millis(250));
/// assert_eq!(stats.steps, 500);
/// assert_eq!(stats.steps_per_second(), 2000.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolveStats {
    /// Steps taken by the search.
    pub steps: u64,
    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
}

impl SolveStats {
    pub fn new(steps: u64, elapsed: Duration) -> Self {
        Self { steps, elapsed }
    }

    /// Returns the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Returns the step rate, zero if no time was measured.
    pub fn steps_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.steps as f64 / secs
        } else {
            0.0
        }
    }
}

//! Cancellation and progress state shared between a running search and
//! the threads watching it.
//!
//! A [`SolverProgress`] is owned through an `Arc` by the solver that runs
//! searches and by every [`SolverHandle`] cloned from it. All fields are
//! atomics so a handle can be polled or used to stop a search from any
//! thread without locking.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

/// Stop flag, remaining-time estimate and running flag for one solver.
///
/// Runs are numbered from 1. A stop request records the number of the run
/// it was aimed at, so a request racing with the end of one run never
/// cancels the next.
#[derive(Debug, Default)]
pub struct SolverProgress {
    /// Number of the current or most recent run, 0 before the first.
    run: AtomicU64,
    /// Run a stop was requested for, 0 if none.
    stop_for: AtomicU64,
    /// `f64` seconds, stored as bits.
    estimated_remaining: AtomicU64,
    solving: AtomicBool,
}

impl SolverProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the running search to stop at its next check point.
    ///
    /// Returns false, and does nothing, if no search is running.
    pub fn request_stop(&self) -> bool {
        self.stop_run(self.run.load(Ordering::SeqCst))
    }

    /// Requests run number `run` to stop. A later run ignores the request.
    fn stop_run(&self, run: u64) -> bool {
        if run == 0 || !self.solving.load(Ordering::SeqCst) {
            return false;
        }
        // Run numbers only grow, so an older request never erases a newer one
        self.stop_for.fetch_max(run, Ordering::SeqCst);
        self.run.load(Ordering::SeqCst) == run
    }

    /// Returns true if a stop was requested during the current run.
    pub fn is_stop_requested(&self) -> bool {
        let run = self.run.load(Ordering::SeqCst);
        run != 0 && self.stop_for.load(Ordering::SeqCst) == run
    }

    /// Returns true while a search is running.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Estimated seconds until the running search completes.
    ///
    /// Zero when idle.
    pub fn estimated_remaining_time(&self) -> f64 {
        f64::from_bits(self.estimated_remaining.load(Ordering::SeqCst))
    }

    /// Marks the start of a run.
    ///
    /// The new run number is taken before the run becomes visible as
    /// solving, so stop requests for earlier runs no longer match. The
    /// returned guard ends the run when dropped, on every exit path.
    pub(crate) fn begin(&self) -> RunGuard<'_> {
        self.run.fetch_add(1, Ordering::SeqCst);
        self.set_estimate(0.0);
        self.solving.store(true, Ordering::SeqCst);
        RunGuard { progress: self }
    }

    /// Extrapolates the remaining time from the time spent so far.
    ///
    /// `index` is the step just finished and `total` the number of steps in
    /// the run. The estimate is `elapsed / (index + 1) * total - elapsed`.
    pub(crate) fn update_estimate(&self, elapsed: Duration, index: f64, total: f64) {
        let elapsed = elapsed.as_secs_f64();
        self.set_estimate(elapsed / (index + 1.0) * total - elapsed);
    }

    fn set_estimate(&self, seconds: f64) {
        let seconds = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self.estimated_remaining
            .store(seconds.to_bits(), Ordering::SeqCst);
    }
}

/// Ends a run when dropped: the estimate goes back to zero and the solver
/// is no longer reported as solving.
#[derive(Debug)]
pub(crate) struct RunGuard<'a> {
    progress: &'a SolverProgress,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.progress.set_estimate(0.0);
        self.progress.solving.store(false, Ordering::SeqCst);
    }
}

/// Emits a DEBUG `progress` event at most once per second.
#[derive(Debug)]
pub(crate) struct ProgressLog {
    algorithm: &'static str,
    last: Instant,
    last_steps: u64,
}

impl ProgressLog {
    pub(crate) fn new(algorithm: &'static str) -> Self {
        Self {
            algorithm,
            last: Instant::now(),
            last_steps: 0,
        }
    }

    pub(crate) fn tick(&mut self, steps: u64, progress: &SolverProgress) {
        let now = Instant::now();
        let since = now.duration_since(self.last);
        if since.as_secs() < 1 {
            return;
        }
        let speed = ((steps - self.last_steps) as f64 / since.as_secs_f64()) as u64;
        debug!(
            event = "progress",
            algorithm = self.algorithm,
            steps,
            speed,
            remaining_secs = progress.estimated_remaining_time(),
        );
        self.last = now;
        self.last_steps = steps;
    }
}

/// Cloneable, thread-safe handle for watching and stopping a solver.
///
/// # Example
///
/// ```
/// use tourforge_core::{City, Map};
/// use tourforge_solver::TourSolver;
///
/// let mut map = Map::new([City::new("A", 0.0, 0.0), City::new("B", 1.0, 0.0)]);
/// map.activate_all();
/// let solver = TourSolver::new(map, "A");
///
/// let handle = solver.handle();
/// assert!(!handle.is_solving());
/// assert_eq!(handle.estimated_remaining_time(), 0.0);
///
/// // Nothing is running, so there is nothing to stop
/// assert!(!handle.request_stop());
/// ```
#[derive(Debug, Clone)]
pub struct SolverHandle {
    solver: Arc<SolverProgress>,
    genetic: Arc<SolverProgress>,
}

impl SolverHandle {
    pub(crate) fn new(solver: Arc<SolverProgress>, genetic: Arc<SolverProgress>) -> Self {
        Self { solver, genetic }
    }

    /// Requests the running search, whichever it is, to stop.
    ///
    /// Returns true if a search was running.
    pub fn request_stop(&self) -> bool {
        let solver = self.solver.request_stop();
        let genetic = self.genetic.request_stop();
        solver || genetic
    }

    /// Estimated seconds until the running search completes, zero when idle.
    pub fn estimated_remaining_time(&self) -> f64 {
        self.solver
            .estimated_remaining_time()
            .max(self.genetic.estimated_remaining_time())
    }

    /// Returns true while any search is running.
    pub fn is_solving(&self) -> bool {
        self.solver.is_solving() || self.genetic.is_solving()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_progress() {
        let progress = SolverProgress::new();
        assert!(!progress.is_solving());
        assert!(!progress.is_stop_requested());
        assert_eq!(progress.estimated_remaining_time(), 0.0);
        assert!(!progress.request_stop());
        assert!(!progress.is_stop_requested());
    }

    #[test]
    fn test_begin_clears_stale_stop() {
        let progress = SolverProgress::new();
        {
            let _run = progress.begin();
            assert!(progress.request_stop());
            assert!(progress.is_stop_requested());
        }
        let _run = progress.begin();
        assert!(!progress.is_stop_requested());
    }

    #[test]
    fn test_stop_aimed_at_finished_run_is_ignored() {
        let progress = SolverProgress::new();
        let first = {
            let _run = progress.begin();
            progress.run.load(Ordering::SeqCst)
        };

        // The request read the first run's number, then the next run began
        let _run = progress.begin();
        assert!(!progress.stop_run(first));
        assert!(!progress.is_stop_requested());

        assert!(progress.request_stop());
        assert!(progress.is_stop_requested());
    }

    #[test]
    fn test_guard_resets_on_drop() {
        let progress = SolverProgress::new();
        {
            let _run = progress.begin();
            progress.update_estimate(Duration::from_secs(1), 0.0, 10.0);
            assert!(progress.is_solving());
            assert_eq!(progress.estimated_remaining_time(), 9.0);
        }
        assert!(!progress.is_solving());
        assert_eq!(progress.estimated_remaining_time(), 0.0);
    }

    #[test]
    fn test_estimate_never_negative() {
        let progress = SolverProgress::new();
        let _run = progress.begin();

        progress.update_estimate(Duration::from_secs(2), 9.0, 5.0);
        assert_eq!(progress.estimated_remaining_time(), 0.0);

        progress.update_estimate(Duration::from_secs(1), 1.0, 4.0);
        assert_eq!(progress.estimated_remaining_time(), 1.0);
    }

    #[test]
    fn test_handle_reports_max_of_both() {
        let solver = Arc::new(SolverProgress::new());
        let genetic = Arc::new(SolverProgress::new());
        let handle = SolverHandle::new(Arc::clone(&solver), Arc::clone(&genetic));

        let _run = genetic.begin();
        genetic.update_estimate(Duration::from_secs(1), 0.0, 4.0);

        assert!(handle.is_solving());
        assert_eq!(handle.estimated_remaining_time(), 3.0);
        assert!(handle.request_stop());
        assert!(genetic.is_stop_requested());
        assert!(!solver.is_stop_requested());
    }
}

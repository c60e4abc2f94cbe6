//! Greedy nearest neighbor construction.
//!
//! Starting at the start city, repeatedly walk to the closest city not yet
//! visited, then return to the start. Ties go to the first candidate in
//! name order.

use std::time::Instant;

use tracing::trace;

use crate::matrix::DistanceMatrix;
use crate::progress::{ProgressLog, SolverProgress};
use crate::run::IndexTour;

pub(crate) const ALGORITHM: &str = "nearest_neighbor";

/// Returns `None` if a stop was requested before the tour was complete.
///
/// The stop flag is checked after each step, so a stop that arrives during
/// the last step still cancels the run.
pub(crate) fn search(
    matrix: &DistanceMatrix,
    start: usize,
    progress: &SolverProgress,
) -> Option<IndexTour> {
    let n = matrix.len();
    let total = n as f64;
    let started = Instant::now();
    let mut log = ProgressLog::new(ALGORITHM);

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n + 1);
    visited[start] = true;
    order.push(start);
    let mut current = start;

    for step in 1..n {
        // min_by keeps the first of equal minima
        let Some(next) = (0..n)
            .filter(|&c| !visited[c])
            .min_by(|&a, &b| matrix.get(current, a).total_cmp(&matrix.get(current, b)))
        else {
            break;
        };

        visited[next] = true;
        order.push(next);
        current = next;

        progress.update_estimate(started.elapsed(), step as f64, total);
        trace!(
            event = "step",
            algorithm = ALGORITHM,
            step,
            city = matrix.city(next).name(),
        );
        log.tick(step as u64, progress);

        if progress.is_stop_requested() {
            return None;
        }
    }

    order.push(start);
    Some(IndexTour {
        order,
        steps: (n - 1) as u64,
    })
}

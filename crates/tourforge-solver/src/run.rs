//! The run protocol every algorithm goes through.
//!
//! 1. Begin the run, clearing any stale stop request.
//! 2. Validate the start city and graph completeness.
//! 3. Return `[start]` straight away when it is the only active city.
//! 4. Otherwise run the search and turn its city indices back into cities.
//!
//! The run ends when the guard drops, whichever way this returns.
//!
//! Logging levels:
//! - **INFO**: run start, end and cancellation

use std::time::Instant;

use tourforge_core::Map;
use tracing::info;

use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::outcome::{SolveOutcome, TourSolution};
use crate::progress::SolverProgress;
use crate::stats::SolveStats;

/// A finished search over matrix indices.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IndexTour {
    pub order: Vec<usize>,
    pub steps: u64,
}

pub(crate) fn run_search<F>(
    progress: &SolverProgress,
    map: &Map,
    start: &str,
    algorithm: &'static str,
    search: F,
) -> Result<SolveOutcome>
where
    F: FnOnce(&DistanceMatrix, usize, &SolverProgress) -> Option<IndexTour>,
{
    let _run = progress.begin();
    let started = Instant::now();

    let (matrix, start_index) = DistanceMatrix::for_tour(map, start)?;

    info!(
        event = "solve_start",
        algorithm,
        city_count = matrix.len(),
        start_city = start,
    );

    let tour = if matrix.len() == 1 {
        IndexTour {
            order: vec![start_index],
            steps: 0,
        }
    } else {
        match search(&matrix, start_index, progress) {
            Some(tour) => tour,
            None => {
                info!(
                    event = "solve_cancelled",
                    algorithm,
                    duration_ms = started.elapsed().as_millis() as u64,
                );
                return Ok(SolveOutcome::Cancelled);
            }
        }
    };

    let elapsed = started.elapsed();
    let distance = matrix.tour_length(&tour.order);
    info!(
        event = "solve_end",
        algorithm,
        duration_ms = elapsed.as_millis() as u64,
        steps = tour.steps,
        distance,
    );

    Ok(SolveOutcome::Solved(TourSolution::new(
        matrix.to_cities(&tour.order),
        distance,
        SolveStats::new(tour.steps, elapsed),
    )))
}

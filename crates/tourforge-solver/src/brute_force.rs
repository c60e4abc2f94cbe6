//! Exhaustive search over every ordering of the non-start cities.
//!
//! `(k - 1)!` tours are evaluated for `k` active cities, so this is only
//! practical for small maps. The first shortest tour found wins.

use std::time::Instant;

use itertools::Itertools;
use tracing::trace;

use crate::matrix::DistanceMatrix;
use crate::progress::{ProgressLog, SolverProgress};
use crate::run::IndexTour;

pub(crate) const ALGORITHM: &str = "brute_force";

/// Returns `None` if a stop was requested before every ordering was seen.
pub(crate) fn search(
    matrix: &DistanceMatrix,
    start: usize,
    progress: &SolverProgress,
) -> Option<IndexTour> {
    let others: Vec<usize> = (0..matrix.len()).filter(|&c| c != start).collect();
    let total: f64 = (1..=others.len()).map(|i| i as f64).product();
    let started = Instant::now();
    let mut log = ProgressLog::new(ALGORITHM);

    let mut best: Option<(f64, Vec<usize>)> = None;
    let mut steps: u64 = 0;

    for (index, permutation) in others.iter().copied().permutations(others.len()).enumerate() {
        if progress.is_stop_requested() {
            return None;
        }

        let length = closed_length(matrix, start, &permutation);
        if best.as_ref().map_or(true, |(shortest, _)| length < *shortest) {
            trace!(
                event = "step",
                algorithm = ALGORITHM,
                permutation = index,
                distance = length,
                improved = true,
            );
            best = Some((length, permutation));
        }

        steps += 1;
        progress.update_estimate(started.elapsed(), index as f64, total);
        log.tick(steps, progress);
    }

    let (_, permutation) = best?;
    let mut order = Vec::with_capacity(permutation.len() + 2);
    order.push(start);
    order.extend(permutation);
    order.push(start);
    Some(IndexTour { order, steps })
}

fn closed_length(matrix: &DistanceMatrix, start: usize, permutation: &[usize]) -> f64 {
    let (Some(&first), Some(&last)) = (permutation.first(), permutation.last()) else {
        return 0.0;
    };
    matrix.get(start, first) + matrix.tour_length(permutation) + matrix.get(last, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourforge_test::{eight_city_map, three_city_map};

    #[test]
    fn test_three_cities() {
        let map = three_city_map();
        let (matrix, start) = DistanceMatrix::for_tour(&map, "City1").unwrap();
        let progress = SolverProgress::new();
        let _run = progress.begin();

        let tour = search(&matrix, start, &progress).unwrap();
        assert_eq!(tour.order, vec![0, 1, 2, 0]);
        assert_eq!(tour.steps, 2);
        assert_eq!(matrix.tour_length(&tour.order), 20.0);
    }

    #[test]
    fn test_evaluates_every_permutation() {
        let map = eight_city_map();
        let (matrix, start) = DistanceMatrix::for_tour(&map, "City1").unwrap();
        let progress = SolverProgress::new();
        let _run = progress.begin();

        let tour = search(&matrix, start, &progress).unwrap();
        assert_eq!(tour.steps, 5040);
        assert_eq!(tour.order.len(), 9);
        assert_eq!(tour.order.first(), Some(&start));
        assert_eq!(tour.order.last(), Some(&start));
    }

    #[test]
    fn test_two_cities() {
        let map = tourforge_test::map_with_all_active([("A", 0.0, 0.0), ("B", 0.0, 2.0)]);
        let (matrix, start) = DistanceMatrix::for_tour(&map, "B").unwrap();
        let progress = SolverProgress::new();
        let _run = progress.begin();

        let tour = search(&matrix, start, &progress).unwrap();
        assert_eq!(tour.order, vec![1, 0, 1]);
        assert_eq!(matrix.tour_length(&tour.order), 4.0);
    }

    #[test]
    fn test_stop_before_first_permutation() {
        let map = eight_city_map();
        let (matrix, start) = DistanceMatrix::for_tour(&map, "City1").unwrap();
        let progress = SolverProgress::new();
        let _run = progress.begin();
        progress.request_stop();

        assert!(search(&matrix, start, &progress).is_none());
    }
}

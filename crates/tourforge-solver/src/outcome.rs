//! What a solve returns.

use std::fmt;
use std::time::Duration;

use tourforge_core::City;

use crate::stats::SolveStats;

/// Result of a search that ran to its end or was stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// The search completed.
    Solved(TourSolution),
    /// A stop was requested before the search completed. No partial tour is
    /// kept.
    Cancelled,
}

impl SolveOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SolveOutcome::Cancelled)
    }

    pub fn solution(&self) -> Option<&TourSolution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Cancelled => None,
        }
    }

    pub fn into_solution(self) -> Option<TourSolution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Cancelled => None,
        }
    }
}

/// A closed tour over every active city.
///
/// The path starts and ends at the start city and visits every other
/// active city exactly once in between. With a single active city the path
/// is just that city.
#[derive(Debug, Clone, PartialEq)]
pub struct TourSolution {
    path: Vec<City>,
    total_distance: f64,
    stats: SolveStats,
}

impl TourSolution {
    pub(crate) fn new(path: Vec<City>, total_distance: f64, stats: SolveStats) -> Self {
        Self {
            path,
            total_distance,
            stats,
        }
    }

    pub fn path(&self) -> &[City] {
        &self.path
    }

    pub fn into_path(self) -> Vec<City> {
        self.path
    }

    /// Sum of the distances between consecutive cities of the path.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Wall-clock time the search took.
    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.stats.elapsed.as_secs_f64()
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// City names along the path.
    pub fn names(&self) -> Vec<&str> {
        self.path.iter().map(City::name).collect()
    }
}

impl fmt::Display for TourSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (distance {:.2}, {:.3}s)",
            self.names().join(" -> "),
            self.total_distance,
            self.elapsed_seconds()
        )
    }
}

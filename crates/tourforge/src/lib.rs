//! TourForge - Traveling salesman tours over an activatable city map
//!
//! Load or build a [`Map`], choose which cities take part, then run any of
//! the three searches through a [`TourSolver`].
//!
//! # Example
//!
//! ```rust
//! use tourforge::prelude::*;
//!
//! let mut map = Map::from_json_str(r#"{
//!     "City1": { "x": 0.0, "y": 0.0 },
//!     "City2": { "x": 3.0, "y": 4.0 },
//!     "City3": { "x": 6.0, "y": 8.0 }
//! }"#).unwrap();
//! map.activate_all();
//!
//! let mut solver = TourSolver::new(map, "City1");
//! let tour = solver.brute_force().unwrap().into_solution().unwrap();
//! assert_eq!(tour.total_distance(), 20.0);
//! ```

pub use tourforge_config::{
    ActivationConfig, ConfigError, GeneticConfig, ProgressConfig, TourConfig,
};
pub use tourforge_core::{
    cities_from_json_str, load_cities, tour_length, City, Distance, LoadError, Map, MapError,
};
pub use tourforge_solver::{
    GeneticParams, GeneticSolver, SolveError, SolveOutcome, SolveStats, SolverHandle,
    SolverProgress, TourSolution, TourSolver,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{City, Distance, Map, MapError};
    pub use super::{
        GeneticParams, SolveError, SolveOutcome, SolverHandle, TourSolution, TourSolver,
    };
    pub use super::TourConfig;
}

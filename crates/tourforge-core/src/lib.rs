//! TourForge Core - the graph model behind the tour solvers
//!
//! This crate provides the data the solvers work on:
//! - `City` and `Distance` geometry primitives
//! - `Map`, a complete graph over a dynamically activatable subset of cities
//! - Loading cities from a JSON coordinates document
//! - Error types for lookups, activation and graph invariants

pub mod error;
pub mod geometry;
pub mod loader;
pub mod map;

pub use error::{LoadError, MapError, Result};
pub use geometry::{City, Distance};
pub use loader::{cities_from_json_str, load_cities};
pub use map::{tour_length, Map};

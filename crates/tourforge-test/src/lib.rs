//! Shared test fixtures for TourForge crates.
//!
//! This crate depends on `tourforge-core` only, so any other crate can use
//! it as a dev-dependency without a cycle.
//!
//! - [`maps`] - Ready-made maps, complete and deliberately broken
//! - [`tour`] - Assertions on solver output
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tourforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use tourforge_test::{eight_city_map, assert_valid_tour};
//! ```

pub mod maps;
pub mod tour;

pub use maps::{eight_city_map, grid_map, incomplete_map, map_with_all_active, three_city_map};
pub use tour::assert_valid_tour;

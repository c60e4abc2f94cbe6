//! Tour Console Demo
//!
//! Loads a city document, activates a random handful of cities around the
//! start city and runs all three searches, printing each tour and its time.
//!
//! ```text
//! tour-console [cities.json] [tour.toml]
//! ```
//!
//! Set `RUST_LOG=tourforge_solver=debug` to see per-second progress lines.

use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tourforge::prelude::*;

const DEFAULT_CITIES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/cities.json");
const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tour.toml");
const DEFAULT_START: &str = "New York";

fn main() -> Result<(), Box<dyn Error>> {
    tourforge::console::init();

    let mut args = env::args().skip(1);
    let cities_path = args.next().unwrap_or_else(|| DEFAULT_CITIES.to_string());
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = TourConfig::load(&config_path).unwrap_or_default();
    config.validate()?;

    let mut map = Map::from_json_file(&cities_path)?;
    let start = config
        .start_city
        .clone()
        .unwrap_or_else(|| DEFAULT_START.to_string());

    let mut rng = match config.random_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    activate_cities(&mut map, &config, &start, &mut rng)?;

    let params = GeneticParams::from_config(&config.genetic)?;
    let poll = config.progress.poll_interval();

    let mut solver = TourSolver::new(map, start);
    if let Some(seed) = config.random_seed {
        solver = solver.with_seed(seed);
    }

    run("Nearest Neighbor", &mut solver, poll, |s| s.nearest_neighbor())?;
    run("Brute Force", &mut solver, poll, |s| s.brute_force())?;
    run("Genetic Algorithm", &mut solver, poll, |s| s.genetic_with(&params))?;

    Ok(())
}

/// Activates the configured cities, then a random selection anchored on
/// `start`.
///
/// A configured `random_count` is used as is, so a count the map cannot
/// satisfy is reported. Only the random default of 2 to 9 cities is capped
/// at the number of known cities.
fn activate_cities<R: Rng + ?Sized>(
    map: &mut Map,
    config: &TourConfig,
    start: &str,
    rng: &mut R,
) -> Result<(), MapError> {
    for name in &config.activation.cities {
        map.activate(name)?;
    }

    let count = match config.activation.random_count {
        Some(count) => count,
        None => rng.random_range(2..=9).min(map.city_count()),
    };
    map.activate_random_with(count, Some(start), rng)
}

/// Runs one search while a second thread polls its remaining time.
fn run(
    label: &str,
    solver: &mut TourSolver,
    poll: Duration,
    solve: impl FnOnce(&mut TourSolver) -> Result<SolveOutcome, SolveError>,
) -> Result<(), SolveError> {
    let handle = solver.handle();
    let done = AtomicBool::new(false);

    let outcome = thread::scope(|scope| {
        scope.spawn(|| watch_progress(label, &handle, &done, poll));
        let outcome = solve(solver);
        done.store(true, Ordering::SeqCst);
        outcome
    })?;

    match outcome {
        SolveOutcome::Solved(tour) => {
            println!("{} solution:", label);
            println!("{}", tour.names().join(" -> "));
            println!(
                "Distance: {:.2}, Time: {:.2} seconds",
                tour.total_distance(),
                tour.elapsed_seconds()
            );
        }
        SolveOutcome::Cancelled => println!("{} was cancelled.", label),
    }
    println!();
    Ok(())
}

fn watch_progress(label: &str, handle: &SolverHandle, done: &AtomicBool, poll: Duration) {
    let mut shown = false;
    while !done.load(Ordering::SeqCst) {
        let remaining = handle.estimated_remaining_time();
        if handle.is_solving() && remaining > 0.0 {
            let mut stderr = io::stderr().lock();
            let _ = write!(stderr, "\r{}: ~{:.1}s remaining   ", label, remaining);
            let _ = stderr.flush();
            shown = true;
        }
        thread::sleep(poll);
    }
    if shown {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_cities() -> Map {
        Map::new([
            City::new("A", 0.0, 0.0),
            City::new("B", 1.0, 0.0),
            City::new("C", 0.0, 1.0),
            City::new("D", 1.0, 1.0),
        ])
    }

    #[test]
    fn test_configured_count_too_large_is_rejected() {
        let mut map = four_cities();
        let config = TourConfig::default().with_random_activation(50);
        let mut rng = StdRng::seed_from_u64(1);

        let err = activate_cities(&mut map, &config, "A", &mut rng).unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidActivationCount {
                requested: 50,
                available: 4,
            }
        );
        assert_eq!(map.active_count(), 0);
    }

    #[test]
    fn test_default_count_is_capped() {
        let mut map = four_cities();
        let mut rng = StdRng::seed_from_u64(7);

        activate_cities(&mut map, &TourConfig::default(), "A", &mut rng).unwrap();
        assert!(map.is_active("A"));
        assert!((2..=4).contains(&map.active_count()));
    }

    #[test]
    fn test_configured_cities_come_first() {
        let mut map = four_cities();
        let config = TourConfig::default()
            .with_active_city("D")
            .with_random_activation(2);
        let mut rng = StdRng::seed_from_u64(3);

        activate_cities(&mut map, &config, "A", &mut rng).unwrap();
        assert!(map.is_active("A"));
        assert!(map.is_active("D"));
        assert!((2..=3).contains(&map.active_count()));
    }
}

//! Tests for the solver facade.

use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::SolveError;
use tourforge_core::MapError;
use tourforge_test::{assert_valid_tour, eight_city_map, grid_map, incomplete_map, three_city_map};

fn solved(outcome: Result<SolveOutcome>) -> crate::TourSolution {
    outcome
        .expect("solve failed")
        .into_solution()
        .expect("solve was cancelled")
}

/// Spins until `condition` holds, failing the test after a few seconds.
fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        thread::yield_now();
    }
}

#[test]
fn test_three_cities_all_algorithms_agree() {
    let mut solver = TourSolver::new(three_city_map(), "City1").with_seed(3);

    let exact = solved(solver.brute_force());
    let greedy = solved(solver.nearest_neighbor());
    let evolved = solved(solver.genetic_algorithm(10, 10, 0.1));

    assert_eq!(exact.total_distance(), 20.0);
    assert_eq!(exact.names(), vec!["City1", "City2", "City3", "City1"]);
    assert_eq!(exact.names(), greedy.names());
    assert_eq!(evolved.total_distance(), 20.0);
}

#[test]
fn test_every_algorithm_returns_a_valid_tour() {
    let mut solver = TourSolver::new(eight_city_map(), "City1").with_seed(11);

    let exact = solved(solver.brute_force());
    let greedy = solved(solver.nearest_neighbor());
    let evolved = solved(solver.genetic_algorithm(50, 100, 0.05));

    for tour in [&exact, &greedy, &evolved] {
        assert_eq!(tour.path().len(), 9);
        assert_valid_tour(solver.map(), "City1", tour.path());
    }
}

#[test]
fn test_brute_force_is_never_beaten() {
    let mut solver = TourSolver::new(eight_city_map(), "City1").with_seed(5);

    let exact = solved(solver.brute_force()).total_distance();
    let greedy = solved(solver.nearest_neighbor()).total_distance();
    let evolved = solved(solver.genetic_algorithm(50, 100, 0.05)).total_distance();

    assert!(exact <= greedy + 1e-9);
    assert!(exact <= evolved + 1e-9);
}

#[test]
fn test_total_distance_matches_path() {
    let mut solver = TourSolver::new(eight_city_map(), "City4");
    let tour = solved(solver.nearest_neighbor());

    let recomputed = tourforge_core::tour_length(solver.map(), tour.path()).unwrap();
    assert!((recomputed - tour.total_distance()).abs() < 1e-9);
}

#[test]
fn test_single_active_city() {
    let mut map = eight_city_map();
    map.deactivate_all();
    map.activate("City1").unwrap();
    let mut solver = TourSolver::new(map, "City1");

    for tour in [
        solved(solver.nearest_neighbor()),
        solved(solver.brute_force()),
        solved(solver.genetic_algorithm(2, 0, 0.0)),
    ] {
        assert_eq!(tour.names(), vec!["City1"]);
        assert_eq!(tour.total_distance(), 0.0);
        assert!(tour.elapsed_seconds() >= 0.0);
    }
}

#[test]
fn test_inactive_start_city() {
    let mut map = three_city_map();
    map.deactivate("City2").unwrap();
    let mut solver = TourSolver::new(map, "City2");

    let expected = SolveError::InvalidStartCity(MapError::ActiveCityNotFound("City2".into()));
    assert_eq!(solver.nearest_neighbor().unwrap_err(), expected);
    assert_eq!(solver.brute_force().unwrap_err(), expected);
    assert_eq!(solver.genetic_algorithm(10, 10, 0.1).unwrap_err(), expected);
}

#[test]
fn test_incomplete_map() {
    let mut solver = TourSolver::new(incomplete_map(), "City1");

    assert!(matches!(
        solver.nearest_neighbor(),
        Err(SolveError::InvalidMap(MapError::NotComplete { .. }))
    ));
    assert!(matches!(solver.brute_force(), Err(SolveError::InvalidMap(_))));
    assert!(matches!(
        solver.genetic_algorithm(10, 10, 0.1),
        Err(SolveError::InvalidMap(_))
    ));
    assert!(!solver.is_solving());
}

#[test]
fn test_genetic_parameters_checked_first() {
    let mut solver = TourSolver::new(incomplete_map(), "Atlantis");

    assert_eq!(
        solver.genetic_algorithm(1, 10, 0.1).unwrap_err(),
        SolveError::InvalidPopulationSize(1)
    );
    assert_eq!(
        solver.genetic_algorithm(10, -1, 0.1).unwrap_err(),
        SolveError::InvalidGenerations(-1)
    );
    assert_eq!(
        solver.genetic_algorithm(10, 10, -0.1).unwrap_err(),
        SolveError::InvalidMutationRate(-0.1)
    );
    assert_eq!(
        solver.genetic_algorithm(10, 10, 1.1).unwrap_err(),
        SolveError::InvalidMutationRate(1.1)
    );
}

#[test]
fn test_map_changes_between_runs() {
    let mut solver = TourSolver::new(eight_city_map(), "City1");
    assert_eq!(solved(solver.nearest_neighbor()).path().len(), 9);

    solver.map_mut().deactivate("City7").unwrap();
    solver.map_mut().deactivate("City8").unwrap();
    let tour = solved(solver.brute_force());
    assert_eq!(tour.path().len(), 7);
    assert!(!tour.names().contains(&"City7"));

    solver.set_start_city("City5");
    assert_eq!(solver.start_city(), "City5");
    assert_eq!(solved(solver.nearest_neighbor()).names()[0], "City5");
}

#[test]
fn test_idle_solver_reports_nothing() {
    let solver = TourSolver::new(three_city_map(), "City1");
    assert!(!solver.is_solving());
    assert!(!solver.request_stop());
    assert_eq!(solver.estimated_remaining_time(), 0.0);
}

#[test]
fn test_stale_stop_does_not_cancel_next_run() {
    let mut solver = TourSolver::new(three_city_map(), "City1");
    solver.request_stop();
    assert!(!solver.brute_force().unwrap().is_cancelled());
}

#[test]
fn test_nearest_neighbor_cancelled_from_another_thread() {
    let mut solver = TourSolver::new(grid_map(1000), "C00");
    let handle = solver.handle();

    thread::scope(|scope| {
        let worker = scope.spawn(|| solver.nearest_neighbor());

        wait_for(|| handle.is_solving());
        assert!(handle.request_stop());

        let outcome = worker.join().unwrap().unwrap();
        assert_eq!(outcome, SolveOutcome::Cancelled);
    });

    assert!(!handle.is_solving());
    assert_eq!(handle.estimated_remaining_time(), 0.0);
}

#[test]
fn test_brute_force_cancelled_from_another_thread() {
    let mut solver = TourSolver::new(grid_map(11), "C00");
    let handle = solver.handle();

    thread::scope(|scope| {
        let worker = scope.spawn(|| solver.brute_force());

        wait_for(|| handle.is_solving());
        wait_for(|| handle.estimated_remaining_time() > 0.0);
        assert!(handle.request_stop());

        let outcome = worker.join().unwrap().unwrap();
        assert_eq!(outcome, SolveOutcome::Cancelled);
    });

    assert!(!handle.is_solving());
    assert_eq!(handle.estimated_remaining_time(), 0.0);
}

#[test]
fn test_genetic_cancelled_from_another_thread() {
    let mut solver = TourSolver::new(eight_city_map(), "City1");
    let handle = solver.handle();

    thread::scope(|scope| {
        let worker = scope.spawn(|| solver.genetic_algorithm(50, 10_000_000, 0.05));

        wait_for(|| handle.is_solving());
        wait_for(|| handle.estimated_remaining_time() > 0.0);
        assert!(handle.request_stop());

        let outcome = worker.join().unwrap().unwrap();
        assert!(outcome.is_cancelled());
    });

    assert!(!handle.is_solving());
    assert_eq!(handle.estimated_remaining_time(), 0.0);

    // The next run starts with a clear stop flag
    let outcome = solver.genetic_algorithm(10, 5, 0.05).unwrap();
    assert!(!outcome.is_cancelled());
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ftm_trilateration::api::{JsonFormatter, SolutionFormatter};
use ftm_trilateration::{
    solve_from_coordinates, solve_from_distances, ConsistencyReport, CoordinateSet, DistanceSet, Edge, SolverError,
    SolverInput, StationSolver,
};

/// Seeded layouts spread over a 20 m square
fn layouts(count: usize) -> Vec<CoordinateSet> {
    let mut rng = StdRng::seed_from_u64(0x2545_f491);

    (0..count)
        .map(|_| {
            let mut values = [0.0; 8];
            for value in values.iter_mut() {
                *value = rng.gen_range(-10.0..10.0);
            }
            CoordinateSet::from_array(values)
        })
        .filter(|coords| {
            // Keep the reference edges clear of zero
            Edge::REFERENCE.iter().all(|&edge| coords.edge_length(edge) > 0.5)
        })
        .collect()
}

#[test]
fn test_round_trip_reproduces_all_ranges() {
    let layouts = layouts(500);
    assert!(layouts.len() > 400);

    for original in layouts {
        let distances = solve_from_coordinates(&original);
        let solution = solve_from_distances(&distances).unwrap();

        let report = ConsistencyReport::evaluate(&distances, &solution.coordinates);
        assert!(
            report.is_consistent(1e-6),
            "layout {:?} residual {} on {}",
            original.to_array(),
            report.max_abs_residual_m,
            report.worst_edge
        );
    }
}

#[test]
fn test_solution_is_in_canonical_frame() {
    for original in layouts(50) {
        let solution = StationSolver::new().solve(&SolverInput::Coordinates(original)).unwrap();
        let [_, _, x1, y1, x2, y2, _, y3] = solution.coordinates.to_array();

        assert_eq!((x1, y1), (0.0, 0.0));
        assert_eq!(y2, 0.0);
        assert!((x2 - original.edge_length(Edge::D12)).abs() < 1e-12);
        assert!(y3 >= 0.0);
    }
}

#[test]
fn test_sin_cos_bounded_for_noisy_ranges() {
    let mut noisy = Vec::new();
    for original in layouts(100) {
        let mut values = solve_from_coordinates(&original).to_array();
        for (i, value) in values.iter_mut().enumerate() {
            // Alternate inflating and shrinking ranges by up to 60%
            let factor = if i % 2 == 0 { 1.6 } else { 0.4 };
            *value *= factor;
        }
        noisy.push(DistanceSet::from_array(values));
    }

    for distances in noisy {
        let angles = solve_from_distances(&distances).unwrap().diagnostics.angles;
        for pair in [angles.theta_12, angles.theta_13, angles.theta_1] {
            assert!((-1.0..=1.0).contains(&pair.sin), "{distances:?}");
            assert!((-1.0..=1.0).contains(&pair.cos), "{distances:?}");
        }
    }
}

#[test]
fn test_invalid_reference_edge_is_reported_before_solving() {
    let distances = DistanceSet::new(4.0, 5.0, 6.0, 7.0, 0.0, 3.0);
    match solve_from_distances(&distances) {
        Err(SolverError::InvalidDistance { edge, value, .. }) => {
            assert_eq!(edge, Edge::D13);
            assert_eq!(value, 0.0);
        }
        other => panic!("expected InvalidDistance, got {other:?}"),
    }
}

#[test]
fn test_json_report_contains_stations() {
    let square = CoordinateSet::from_array([0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
    let solution = StationSolver::new().solve(&SolverInput::Coordinates(square)).unwrap();

    let formatted = SolutionFormatter::with_diagnostics().format(&solution);
    let json = JsonFormatter::new().format_json(&formatted).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["stations"].as_array().map(|s| s.len()), Some(4));
    assert_eq!(value["stations"][2]["x"], 10.0);
    assert_eq!(value["sign"], 1.0);
    assert_eq!(value["diagnostics"]["consistent"], true);
}

//! Loads instances from disk and runs every strategy end to end.

use std::fs;
use std::path::PathBuf;

use u_qap::qap::MatrixLoader;
use u_qap::tabu::{Admissibility, MemoryKind, TabuConfig, TabuRunner, TenurePolicy};
use u_qap::LoadError;

const FLOW: &str = "\
0,5,2,4,1,0,0,6
5,0,3,0,2,2,2,0
2,3,0,0,0,0,0,5
4,0,0,0,5,2,2,10
1,2,0,5,0,10,0,0
0,2,0,2,10,0,5,1
0,2,0,2,0,5,0,10
6,0,5,10,0,1,10,0
";

const DISTANCE: &str = "\
0,1,2,3,1,2,3,4
1,0,1,2,2,1,2,3
2,1,0,1,3,2,1,2
3,2,1,0,4,3,2,1
1,2,3,4,0,1,2,3
2,1,2,3,1,0,1,2
3,2,1,2,2,1,0,1
4,3,2,1,3,2,1,0
";

/// Writes `contents` to a file unique to this test process.
fn write_temp(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("u-qap-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_and_solve_all_strategies() {
    let flow = write_temp("e2e_flow.csv", FLOW);
    let dist = write_temp("e2e_dist.csv", DISTANCE);
    let qap = MatrixLoader::new()
        .with_dimension(8)
        .load_instance(&flow, &dist)
        .unwrap();
    assert_eq!(qap.size(), 8);

    for strategy in Admissibility::ALL {
        let config = TabuConfig::default()
            .with_max_iterations(300)
            .with_tabu_tenure(6)
            .with_strategy(strategy)
            .with_seed(2024);
        let result = TabuRunner::run(&qap, &config).unwrap();

        assert_eq!(result.iterations, 300, "{strategy}");
        assert!(result.best_cost <= result.initial_cost, "{strategy}");
        assert_eq!(result.best_cost, qap.cost(&result.best), "{strategy}");
    }
}

#[test]
fn test_dynamic_tenure_and_visited_memory() {
    let flow = write_temp("dyn_flow.csv", FLOW);
    let dist = write_temp("dyn_dist.csv", DISTANCE);
    let qap = MatrixLoader::new().load_instance(&flow, &dist).unwrap();

    let dynamic = TabuConfig::default()
        .with_max_iterations(200)
        .with_tenure(TenurePolicy::Dynamic {
            min: 5,
            max: 25,
            refresh_interval: 50,
        })
        .with_seed(3);
    let a = TabuRunner::run(&qap, &dynamic).unwrap();
    let b = TabuRunner::run(&qap, &dynamic).unwrap();
    assert_eq!(a, b);

    let visited = TabuConfig::default()
        .with_max_iterations(200)
        .with_memory(MemoryKind::Visited { capacity: 30 })
        .with_strategy(Admissibility::AspirationGlobal)
        .with_seed(3);
    let result = TabuRunner::run(&qap, &visited).unwrap();
    assert_eq!(result.best_cost, qap.cost(&result.best));
}

#[test]
fn test_dimension_mismatch_between_files() {
    let flow = write_temp("mm_flow.csv", "0,1\n1,0\n");
    let dist = write_temp("mm_dist.csv", "0,1,2\n1,0,3\n2,3,0\n");
    let err = MatrixLoader::new().load_instance(&flow, &dist).unwrap_err();
    assert!(matches!(
        err,
        LoadError::DimensionMismatch {
            flow: 2,
            distance: 3
        }
    ));
}

#[test]
fn test_bad_cell_reports_file_and_line() {
    let flow = write_temp("bad_flow.csv", "0,1,2\n1,0,3\n2,three,0\n");
    let dist = write_temp("bad_dist.csv", "0,1,1\n1,0,2\n1,2,0\n");
    let err = MatrixLoader::new().load_instance(&flow, &dist).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("bad_flow.csv:3:2"), "{message}");
    assert!(message.contains("three"), "{message}");
}

#[test]
fn test_missing_distance_file() {
    let flow = write_temp("only_flow.csv", "0,1\n1,0\n");
    let missing = flow.with_file_name("no_such_distance.csv");
    let err = MatrixLoader::new().load_instance(&flow, &missing).unwrap_err();
    assert!(matches!(err, LoadError::MissingFile { .. }));
}

use std::io::Write;
use std::path::Path;

use climber_config::{ClimberConfig, SearchConfigOverride};
use climber_core::{FeasibilityPolicy, Genotype, Score};
use climber_solver::TerminationReason;
use tempfile::NamedTempFile;

use super::*;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const PROJECTS: &str = "\
ProjectID,Cost_Soles,Benefit_Soles
P1,3000,5000
P2,2000,4500
P3,2500,3000
P4,1000,9000
P5,1500,1000
";

const THESIS: &str = "\
TesistaID,F1,F2,F3,F4,F5,F6
T1,1,1,0,0,0,0
T2,1,0,0,0,0,0
T3,0,1,1,1,0,0
T4,0,0,0,0,1,1
T5,1,1,1,1,1,1
";

#[test]
fn test_load_and_solve_projects() {
    let file = write_csv(PROJECTS);
    let portfolio = ProjectPortfolio::load(file.path()).unwrap();

    let result = solve(&portfolio, &ClimberConfig::default(), 17).unwrap();

    assert_eq!(result.runs.len(), 1);
    let best = result.into_best();
    assert!(best.best_score.is_feasible());
    assert!(portfolio.total_cost(&best.best_solution) <= portfolio.budget());
}

#[test]
fn test_missing_data_file() {
    let result = ProjectPortfolio::load(Path::new("/no/such/projects.csv"));
    assert!(matches!(result, Err(DataUnavailable::Missing { .. })));
}

#[test]
fn test_wrong_columns() {
    let file = write_csv("ProjectID,Cost\nP1,10\n");
    let result = ProjectPortfolio::load(file.path());
    assert!(matches!(
        result,
        Err(DataUnavailable::MissingColumn { column }) if column == "Cost_Soles"
    ));
}

#[test]
fn test_restarts_parallel_match_sequential() {
    let file = write_csv(PROJECTS);
    let portfolio = ProjectPortfolio::load(file.path()).unwrap();
    let sequential = ClimberConfig::new().with_restarts(4);
    let parallel = sequential.clone().with_parallel(true);

    let a = solve(&portfolio, &sequential, 3).unwrap();
    let b = solve(&portfolio, &parallel, 3).unwrap();

    assert_eq!(a.runs.len(), 4);
    assert_eq!(a, b);
}

#[test]
fn test_config_overrides_adapter_defaults() {
    let file = write_csv(PROJECTS);
    let portfolio = ProjectPortfolio::load(file.path()).unwrap();
    let config = ClimberConfig::new().with_search(SearchConfigOverride {
        max_iterations: Some(5),
        ..SearchConfigOverride::default()
    });

    let outcome = solve_and_report(&portfolio, &config, 1).unwrap();

    assert_eq!(outcome.iterations_run, 5);
    assert_eq!(outcome.termination, TerminationReason::IterationLimit);
    assert!(!outcome.converged);
}

#[test]
fn test_invalid_override_is_rejected() {
    let file = write_csv(PROJECTS);
    let portfolio = ProjectPortfolio::load(file.path()).unwrap();
    let config = ClimberConfig::new().with_search(SearchConfigOverride {
        max_iterations: Some(0),
        ..SearchConfigOverride::default()
    });

    assert!(solve(&portfolio, &config, 1).is_err());
}

#[test]
fn test_outcome_serializes() {
    let file = write_csv(THESIS);
    let schedule = DefenseSchedule::load(file.path()).unwrap();
    let config = ClimberConfig::new().with_feasibility(FeasibilityPolicy::HardBlock);

    let outcome = solve_and_report(&schedule, &config, 9).unwrap();

    assert_eq!(outcome.problem, "thesis");
    assert!(matches!(outcome.solution, Genotype::Assignment(ref cells) if cells.len() == 5));
    assert!(outcome.score.is_feasible());
    assert_eq!(outcome.report.rows.len(), 5);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["problem"], "thesis");
    assert_eq!(json["solution"]["kind"], "assignment");
    assert_eq!(json["termination"], "iteration_limit");
}

#[test]
fn test_thesis_calendar_written_as_csv() {
    let file = write_csv(THESIS);
    let schedule = DefenseSchedule::load(file.path()).unwrap();
    let outcome = solve_and_report(&schedule, &ClimberConfig::default(), 2).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.csv");
    outcome.report.write_csv(&path).unwrap();

    let reloaded = CsvLoader::new().load(&path).unwrap();
    assert_eq!(reloaded.headers(), &["TesistaID", "Sala", "Franja"]);
    assert_eq!(reloaded.len(), 5);
    // The sequential calendar leaves a two-slot gap in the second room.
    assert_eq!(outcome.statistics.initial_score(), Some(Score::of(2.0)));
    assert!(outcome.score.value().unwrap() <= 2.0);
}

//! Tests for climber configuration.

use std::io::Write;

use climber_core::{FeasibilityPolicy, Objective};

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42
        restarts = 4
        parallel = true

        [search]
        max_iterations = 1000
        objective = "minimize"
        acceptance = "first_improvement"
        stop_on_no_improvement = false
        stop_on_target_score = 0.0
        unimproved_iteration_limit = 200

        [feasibility]
        type = "soft_penalty"
        weight = 2.5
    "#;

    let config = ClimberConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.restarts, Some(4));
    assert!(config.parallel);
    assert_eq!(
        config.feasibility,
        Some(FeasibilityPolicy::SoftPenalty { weight: 2.5 })
    );

    let search = config.search_config(SearchConfig::default());
    assert_eq!(search.objective, Objective::Minimize);
    assert_eq!(search.stop_on_target_score, Some(0.0));
    assert_eq!(search.unimproved_iteration_limit, Some(200));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 7
        search:
          max_iterations: 50
          acceptance: best_of_step
        feasibility:
          type: hard_block
    "#;

    let config = ClimberConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(7));
    assert_eq!(config.feasibility, Some(FeasibilityPolicy::HardBlock));
    let search = config.search_config(SearchConfig::default());
    assert_eq!(search.max_iterations, 50);
    assert_eq!(search.acceptance, AcceptanceRule::BestOfStep);
}

#[test]
fn test_override_keeps_unset_fields() {
    let base = SearchConfig::new()
        .with_max_iterations(101)
        .with_stop_on_no_improvement(true)
        .with_target_score(3.0);
    let overrides = SearchConfigOverride {
        max_iterations: Some(10),
        ..Default::default()
    };

    let merged = overrides.apply(base.clone());
    assert_eq!(merged.max_iterations, 10);
    assert!(merged.stop_on_no_improvement);
    assert_eq!(merged.stop_on_target_score, Some(3.0));
    assert_eq!(merged.objective, base.objective);
}

#[test]
fn test_zero_iterations_rejected() {
    let result = ClimberConfig::from_toml_str(
        r#"
        [search]
        max_iterations = 0
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_zero_restarts_rejected() {
    let result = ClimberConfig::from_toml_str("restarts = 0");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_bad_penalty_weight_rejected() {
    let result = ClimberConfig::from_toml_str(
        r#"
        [feasibility]
        type = "soft_penalty"
        weight = 0.0
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_unknown_acceptance_is_parse_error() {
    let result = ClimberConfig::from_toml_str(
        r#"
        [search]
        acceptance = "simulated_annealing"
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_load_picks_format_by_extension() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(yaml, "restarts: 3").unwrap();
    assert_eq!(ClimberConfig::load(yaml.path()).unwrap().restarts, Some(3));

    let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(toml, "restarts = 5").unwrap();
    assert_eq!(ClimberConfig::load(toml.path()).unwrap().restarts, Some(5));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClimberConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_builder() {
    let config = ClimberConfig::new()
        .with_random_seed(123)
        .with_restarts(8)
        .with_parallel(true)
        .with_feasibility(FeasibilityPolicy::HardBlock);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.restarts, Some(8));
    assert_eq!(
        config.feasibility_or(FeasibilityPolicy::default()),
        FeasibilityPolicy::HardBlock
    );
    assert_eq!(
        ClimberConfig::new().feasibility_or(FeasibilityPolicy::default()),
        FeasibilityPolicy::SoftPenalty { weight: 1.0 }
    );
}

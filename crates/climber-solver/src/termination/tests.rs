//! Tests for termination conditions.

use climber_core::{Objective, Score};

use super::*;

fn state_after(score: f64, iterations: u64, stalled: u64) -> SearchState<()> {
    let mut state = SearchState::new((), Score::of(score));
    for i in 0..iterations {
        state.begin_iteration();
        if i >= iterations - stalled {
            state.stall();
        }
    }
    state
}

#[test]
fn test_iteration_limit() {
    let config = SearchConfig::new().with_max_iterations(3);
    let term = IterationLimitTermination;

    assert_eq!(term.check(&state_after(0.0, 2, 0), &config), None);
    assert_eq!(
        term.check(&state_after(0.0, 3, 0), &config),
        Some(TerminationReason::IterationLimit)
    );
}

#[test]
fn test_target_not_configured() {
    let config = SearchConfig::new();
    assert_eq!(TargetScoreTermination.check(&state_after(1e9, 0, 0), &config), None);
}

#[test]
fn test_target_respects_direction() {
    let min = SearchConfig::new()
        .with_objective(Objective::Minimize)
        .with_target_score(0.0);
    assert_eq!(TargetScoreTermination.check(&state_after(1.0, 0, 0), &min), None);
    assert_eq!(
        TargetScoreTermination.check(&state_after(0.0, 0, 0), &min),
        Some(TerminationReason::TargetReached)
    );

    let max = SearchConfig::new().with_target_score(25.0);
    assert_eq!(
        TargetScoreTermination.check(&state_after(30.0, 0, 0), &max),
        Some(TerminationReason::TargetReached)
    );
}

#[test]
fn test_target_ignores_infeasible() {
    let config = SearchConfig::new()
        .with_objective(Objective::Minimize)
        .with_target_score(1e12);
    let state = SearchState::new((), Score::Infeasible);
    assert_eq!(TargetScoreTermination.check(&state, &config), None);
}

#[test]
fn test_stop_on_no_improvement() {
    let config = SearchConfig::new().with_stop_on_no_improvement(true);
    let term = UnimprovedIterationTermination;

    assert_eq!(term.check(&state_after(0.0, 1, 0), &config), None);
    assert_eq!(
        term.check(&state_after(0.0, 1, 1), &config),
        Some(TerminationReason::LocalOptimum)
    );
}

#[test]
fn test_unimproved_limit() {
    let config = SearchConfig::new().with_unimproved_iteration_limit(3);
    let term = UnimprovedIterationTermination;

    assert_eq!(term.check(&state_after(0.0, 5, 2), &config), None);
    assert_eq!(
        term.check(&state_after(0.0, 5, 3), &config),
        Some(TerminationReason::LocalOptimum)
    );
    assert_eq!(term.check(&state_after(0.0, 5, 5), &SearchConfig::new()), None);
}

#[test]
fn test_tighter_unimproved_limit_wins() {
    let config = SearchConfig::new()
        .with_stop_on_no_improvement(true)
        .with_unimproved_iteration_limit(10);
    assert_eq!(UnimprovedIterationTermination::limit(&config), Some(1));
}

#[test]
fn test_default_priority_order() {
    let config = SearchConfig::new()
        .with_max_iterations(1)
        .with_stop_on_no_improvement(true);
    let term = DefaultTermination::default();

    // Both the local optimum and the limit apply; the local optimum wins.
    assert_eq!(
        term.check(&state_after(0.0, 1, 1), &config),
        Some(TerminationReason::LocalOptimum)
    );
    assert_eq!(
        term.check(&state_after(0.0, 1, 0), &config),
        Some(TerminationReason::IterationLimit)
    );
    assert_eq!(term.check(&state_after(0.0, 0, 0), &config), None);
}

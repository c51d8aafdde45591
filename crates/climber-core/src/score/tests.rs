//! Tests for scores and objective ordering.

use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;

#[test]
fn test_nan_is_infeasible() {
    assert_eq!(Score::of(f64::NAN), Score::Infeasible);
    assert!(!Score::of(f64::NAN).is_feasible());
    assert_eq!(Score::of(-3.5).value(), Some(-3.5));
}

#[test]
fn test_maximize_ordering() {
    let objective = Objective::Maximize;
    assert!(objective.is_better(&Score::of(30.0), &Score::of(20.0)));
    assert!(!objective.is_better(&Score::of(20.0), &Score::of(30.0)));
}

#[test]
fn test_minimize_ordering() {
    let objective = Objective::Minimize;
    assert!(objective.is_better(&Score::of(12.0), &Score::of(21.0)));
    assert!(!objective.is_better(&Score::of(21.0), &Score::of(12.0)));
}

#[test]
fn test_ties_are_not_improvements() {
    for objective in [Objective::Maximize, Objective::Minimize] {
        assert!(!objective.is_better(&Score::of(4.0), &Score::of(4.0)));
        assert!(!objective.is_better(&Score::Infeasible, &Score::Infeasible));
    }
}

#[test]
fn test_infeasible_is_worst_in_both_directions() {
    for objective in [Objective::Maximize, Objective::Minimize] {
        assert_eq!(
            objective.compare(&Score::Infeasible, &Score::of(f64::MAX)),
            Ordering::Less
        );
        assert_eq!(
            objective.compare(&Score::Infeasible, &Score::of(f64::MIN)),
            Ordering::Less
        );
        assert!(objective.is_better(&Score::of(1e12), &Score::Infeasible));
    }
}

#[test]
fn test_direction_sentinel_mapping() {
    assert_eq!(Objective::Maximize.score(f64::NEG_INFINITY), Score::Infeasible);
    assert_eq!(Objective::Minimize.score(f64::INFINITY), Score::Infeasible);
    assert_eq!(
        Objective::Minimize.score(f64::NEG_INFINITY),
        Score::Feasible(f64::NEG_INFINITY)
    );
    assert_eq!(Objective::Maximize.value_of(&Score::Infeasible), f64::NEG_INFINITY);
    assert_eq!(Objective::Minimize.value_of(&Score::Infeasible), f64::INFINITY);
}

#[test]
fn test_target_satisfaction() {
    assert!(Objective::Minimize.satisfies(&Score::of(0.0), 0.0));
    assert!(!Objective::Minimize.satisfies(&Score::of(1.0), 0.0));
    assert!(Objective::Maximize.satisfies(&Score::of(30.0), 25.0));
    assert!(!Objective::Maximize.satisfies(&Score::Infeasible, f64::NEG_INFINITY));
}

#[test]
fn test_display() {
    assert_eq!(Score::of(12.0).to_string(), "12");
    assert_eq!(Score::Infeasible.to_string(), "infeasible");
}

fn any_score() -> impl Strategy<Value = Score> {
    prop_oneof![
        1 => Just(Score::Infeasible),
        4 => (-1e9f64..1e9).prop_map(Score::of),
    ]
}

proptest! {
    #[test]
    fn prop_compare_is_antisymmetric(a in any_score(), b in any_score()) {
        for objective in [Objective::Maximize, Objective::Minimize] {
            prop_assert_eq!(objective.compare(&a, &b), objective.compare(&b, &a).reverse());
        }
    }

    #[test]
    fn prop_compare_is_transitive(a in any_score(), b in any_score(), c in any_score()) {
        for objective in [Objective::Maximize, Objective::Minimize] {
            if objective.is_better(&a, &b) && objective.is_better(&b, &c) {
                prop_assert!(objective.is_better(&a, &c));
            }
        }
    }
}

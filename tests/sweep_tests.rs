//! Tests for the size-sweep controller: exact visit sequence, boundary
//! behavior, and restartability.

use linbench::SweepConfig;

fn sweep(from: i64, to: i64, step: i64) -> SweepConfig {
    SweepConfig {
        from,
        to,
        step,
        loops: 1,
        random_input: false,
    }
}

#[test]
fn visits_exactly_the_arithmetic_sequence() {
    let config = sweep(3, 17, 4);
    let sizes: Vec<usize> = config.sizes().collect();
    assert_eq!(sizes, vec![3, 7, 11, 15]);
    assert_eq!(config.size_count(), sizes.len());
}

#[test]
fn size_count_matches_closed_form() {
    for (from, to, step) in [(1, 200, 1), (1, 200, 7), (10, 10, 1), (5, 100, 13)] {
        let config = sweep(from, to, step);
        let expected = ((to - from) / step + 1) as usize;
        assert_eq!(config.size_count(), expected);
        assert_eq!(config.sizes().count(), expected);
    }
}

#[test]
fn equal_bounds_visit_one_size() {
    let sizes: Vec<usize> = sweep(10, 10, 1).sizes().collect();
    assert_eq!(sizes, vec![10]);
}

#[test]
fn oversized_step_visits_only_from() {
    let sizes: Vec<usize> = sweep(5, 9, 100).sizes().collect();
    assert_eq!(sizes, vec![5]);
}

#[test]
fn last_visited_size_never_exceeds_to() {
    let config = sweep(2, 11, 3);
    let last = config.sizes().last().unwrap();
    assert_eq!(last, 11);
    let config = sweep(2, 12, 3);
    assert_eq!(config.sizes().last().unwrap(), 11);
}

#[test]
fn sequence_is_restartable() {
    let config = sweep(1, 50, 5);
    let first: Vec<usize> = config.sizes().collect();
    let second: Vec<usize> = config.sizes().collect();
    assert_eq!(first, second);
}

#[test]
fn validation_accepts_all_valid_ranges() {
    assert!(sweep(1, 1, 1).validate().is_ok());
    assert!(sweep(1, 200, 199).validate().is_ok());
}

//! Tests for the random number service and divisor helper

use rstest::rstest;

use flakegen::domain::{common_denominators, DomainError, RandSource, RandomNumberService};

#[rstest]
#[case(6, vec![1, 2, 3])]
#[case(7, vec![1])]
#[case(10, vec![1, 2, 5])]
#[case(5, vec![1])]
#[case(8, vec![1, 2, 4])]
#[case(9, vec![1, 3])]
fn given_branch_count_when_listing_denominators_then_proper_divisors_up_to_half(
    #[case] n: u32,
    #[case] expected: Vec<u32>,
) {
    assert_eq!(common_denominators(n), expected);
}

#[test]
fn given_inverted_int_range_when_drawing_then_invalid_range() {
    // Arrange
    let mut rng = RandomNumberService::seeded(1);

    // Act
    let result = rng.random_int(10, 5);

    // Assert
    assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
}

#[test]
fn given_non_finite_real_range_when_drawing_then_invalid_range() {
    let mut rng = RandomNumberService::seeded(1);
    assert!(rng.random_real(0.0, f64::NAN).is_err());
    assert!(rng.random_real(f64::NEG_INFINITY, 1.0).is_err());
}

#[test]
fn given_same_seed_when_drawing_then_same_sequence() {
    // Arrange
    let mut a = RandomNumberService::seeded(2024);
    let mut b = RandomNumberService::seeded(2024);

    // Act
    let left: Vec<i64> = (0..32).map(|_| a.random_int(0, 1000).unwrap()).collect();
    let right: Vec<i64> = (0..32).map(|_| b.random_int(0, 1000).unwrap()).collect();

    // Assert
    assert_eq!(left, right);
}

#[test]
fn given_ranges_when_drawing_many_then_values_stay_inside() {
    let mut rng = RandomNumberService::seeded(77);
    for _ in 0..1000 {
        let i = rng.random_int(5, 10).unwrap();
        assert!((5..=10).contains(&i));
        let r = rng.random_real(0.25, 0.5).unwrap();
        assert!((0.25..0.5).contains(&r));
    }
}

#[test]
fn given_degenerate_ranges_when_drawing_then_min_returned() {
    let mut rng = RandomNumberService::seeded(3);
    assert_eq!(rng.random_int(7, 7).unwrap(), 7);
    assert_eq!(rng.random_real(1.5, 1.5).unwrap(), 1.5);
}

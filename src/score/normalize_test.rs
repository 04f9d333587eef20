use super::*;
use proptest::prelude::*;

#[test]
fn test_normalize_midpoint() {
    let s = normalize(5.0, 0.0, 10.0);
    assert!((s - 0.5).abs() < 1e-12, "midpoint should be 0.5, got {s}");
}

#[test]
fn test_normalize_bounds() {
    assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
    assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
}

#[test]
fn test_normalize_clamps_below() {
    assert_eq!(normalize(-3.0, 0.0, 1.0), 0.0);
}

#[test]
fn test_normalize_clamps_above() {
    assert_eq!(normalize(1e12, 0.0, 10_000.0), 1.0);
}

#[test]
fn test_normalize_negative_range() {
    let s = normalize(0.0, -0.5, 2.0);
    assert!((s - 0.2).abs() < 1e-12, "0 on -0.5..2 should be 0.2, got {s}");
}

#[test]
fn test_normalize_degenerate_range() {
    assert_eq!(normalize(0.0, 1.0, 1.0), 0.5);
    assert_eq!(normalize(-7.0, 3.0, 3.0), 0.5);
}

#[test]
fn test_normalize_nan_propagates() {
    assert!(normalize(f64::NAN, 0.0, 1.0).is_nan());
}

#[test]
fn test_interaction_balance_zero_total() {
    assert_eq!(interaction_balance(0.0, 0.0, 0.0), 0.0);
}

#[test]
fn test_interaction_balance_ideal() {
    let s = interaction_balance(70.0, 20.0, 10.0);
    assert!((s - 1.0).abs() < 1e-9, "ideal mix should score 1, got {s}");
}

#[test]
fn test_interaction_balance_scale_invariant() {
    let a = interaction_balance(0.7, 0.15, 0.15);
    let b = interaction_balance(70.0, 15.0, 15.0);
    assert!((a - b).abs() < 1e-9);
    assert!((a - 0.95).abs() < 1e-9, "expected 0.95, got {a}");
}

#[test]
fn test_interaction_balance_likes_only() {
    // deviation = 0.3 + 0.2 + 0.1 = 0.6
    let s = interaction_balance(1.0, 0.0, 0.0);
    assert!((s - 0.7).abs() < 1e-9, "likes only should score 0.7, got {s}");
}

#[test]
fn test_interaction_balance_shares_only() {
    // deviation = 0.7 + 0.2 + 0.9 = 1.8
    let s = interaction_balance(0.0, 0.0, 5.0);
    assert!((s - 0.1).abs() < 1e-9, "shares only should score 0.1, got {s}");
}

proptest! {
    #[test]
    fn normalize_stays_in_unit_interval(
        v in -1e9f64..1e9,
        min in -1e6f64..1e6,
        span in 0.0f64..1e6,
    ) {
        let s = normalize(v, min, min + span);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn normalize_is_monotonic(
        a in -1e6f64..1e6,
        b in -1e6f64..1e6,
        min in -1e3f64..1e3,
        span in 1e-3f64..1e3,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(normalize(lo, min, min + span) <= normalize(hi, min, min + span));
    }

    #[test]
    fn interaction_balance_in_unit_interval(
        likes in 0.0f64..1e6,
        comments in 0.0f64..1e6,
        shares in 0.0f64..1e6,
    ) {
        let s = interaction_balance(likes, comments, shares);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&s));
    }
}

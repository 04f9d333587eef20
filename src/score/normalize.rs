//! Range normalization shared by every scorer.
//!
//! Raw metrics arrive on wildly different scales (rates, currency, seconds,
//! growth percentages). Each is mapped linearly onto 0..1 against a fixed
//! range; values outside the range clamp to the nearest end.

/// Map `value` linearly from `[min, max]` onto `[0, 1]`, clamping.
///
/// A degenerate range (`min == max`) yields the neutral 0.5 rather than
/// dividing by zero. NaN input propagates so the caller can detect it.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if min == max {
        return 0.5;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Ideal split of interactions: likes, comments, shares.
const IDEAL_MIX: [f64; 3] = [0.7, 0.2, 0.1];

/// How close the likes/comments/shares mix is to the ideal 70/20/10 split.
///
/// 1.0 is a perfect match; the score drops by half the total absolute
/// deviation. No interactions at all scores exactly 0.0.
pub fn interaction_balance(likes: f64, comments: f64, shares: f64) -> f64 {
    let total = likes + comments + shares;
    if total == 0.0 {
        return 0.0;
    }
    let deviation: f64 = [likes, comments, shares]
        .iter()
        .zip(IDEAL_MIX)
        .map(|(actual, ideal)| (actual / total - ideal).abs())
        .sum();
    (1.0 - deviation / 2.0).max(0.0)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

//! Shape catalog, shape counts and their weights
//!
//! Shapes are recognized by plain substring containment over a window encoded with
//! `1` (own), `0` (empty) and `x` (blocked). Each shape contributes at most once per
//! window, except that a window can feed several shapes of different sizes at once.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

const FIVE: &[&[u8]] = &[b"11111"];
const OPEN_FOUR: &[&[u8]] = &[b"011110"];
const BLOCKED_FOUR: &[&[u8]] = &[b"01111", b"11110", b"11011", b"10111", b"11101"];
const OPEN_THREE: &[&[u8]] = &[b"01110"];
const BLOCKED_THREE: &[&[u8]] = &[
    b"11100", b"00111", b"11010", b"01011", b"10110", b"01101",
];
const OPEN_TWO: &[&[u8]] = &[b"01100", b"00110", b"011010", b"010110"];
const BLOCKED_TWO: &[&[u8]] = &[b"11000", b"00011", b"10100", b"00101", b"10010"];

/// Occurrences of `needle` in `line`, overlapping matches included
#[inline]
fn occurrences(line: &[u8], needle: &[u8]) -> usize {
    if needle.len() > line.len() {
        return 0;
    }
    line.windows(needle.len()).filter(|w| *w == needle).count()
}

#[inline]
fn contains(line: &[u8], needle: &[u8]) -> bool {
    occurrences(line, needle) > 0
}

#[inline]
fn contains_any(line: &[u8], needles: &[&[u8]]) -> bool {
    needles.iter().any(|n| contains(line, n))
}

/// Per-shape occurrence counts for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternCounts {
    pub five: u32,
    pub open_four: u32,
    pub double_four: u32,
    pub blocked_four: u32,
    pub double_three: u32,
    pub open_three: u32,
    pub blocked_three: u32,
    pub open_two: u32,
    pub blocked_two: u32,
}

impl AddAssign for PatternCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.five += rhs.five;
        self.open_four += rhs.open_four;
        self.double_four += rhs.double_four;
        self.blocked_four += rhs.blocked_four;
        self.double_three += rhs.double_three;
        self.open_three += rhs.open_three;
        self.blocked_three += rhs.blocked_three;
        self.open_two += rhs.open_two;
        self.blocked_two += rhs.blocked_two;
    }
}

impl std::iter::Sum for PatternCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(PatternCounts::default(), |mut acc, c| {
            acc += c;
            acc
        })
    }
}

/// Classify a single window.
///
/// Most specific first: within one size tier the open shape wins, so a window holding
/// `01110` does not also count as a blocked three even though `00111` is a substring.
/// Tiers are independent of each other.
#[must_use]
pub fn classify(line: &[u8]) -> PatternCounts {
    let mut counts = PatternCounts::default();

    if contains_any(line, FIVE) {
        counts.five = 1;
    }

    let open_four = contains_any(line, OPEN_FOUR);
    if open_four {
        counts.open_four = 1;
    } else if contains_any(line, BLOCKED_FOUR) {
        counts.blocked_four = 1;
    }
    if (open_four && (contains(line, b"11110") || contains(line, b"01111")))
        || occurrences(line, b"11110") >= 2
        || occurrences(line, b"01111") >= 2
    {
        counts.double_four = 1;
    }

    let open_threes = occurrences(line, OPEN_THREE[0]);
    if open_threes > 0 {
        counts.open_three = 1;
    } else if contains_any(line, BLOCKED_THREE) {
        counts.blocked_three = 1;
    }
    if open_threes >= 2 {
        counts.double_three = 1;
    }

    if contains_any(line, OPEN_TWO) {
        counts.open_two = 1;
    } else if contains_any(line, BLOCKED_TWO) {
        counts.blocked_two = 1;
    }

    counts
}

/// Heuristic weight per shape.
///
/// Must stay strictly descending by severity (see [`PatternWeights::is_descending`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternWeights {
    pub five: f64,
    pub open_four: f64,
    pub double_four: f64,
    pub blocked_four: f64,
    pub double_three: f64,
    pub open_three: f64,
    pub blocked_three: f64,
    pub open_two: f64,
    pub blocked_two: f64,
}

impl PatternWeights {
    pub const DEFAULT: PatternWeights = PatternWeights {
        five: 1_000_000.0,
        open_four: 100_000.0,
        double_four: 50_000.0,
        blocked_four: 10_000.0,
        double_three: 8_000.0,
        open_three: 5_000.0,
        blocked_three: 1_000.0,
        open_two: 200.0,
        blocked_two: 50.0,
    };

    /// Σ count × weight
    #[inline]
    pub fn score(&self, counts: &PatternCounts) -> f64 {
        f64::from(counts.five) * self.five
            + f64::from(counts.open_four) * self.open_four
            + f64::from(counts.double_four) * self.double_four
            + f64::from(counts.blocked_four) * self.blocked_four
            + f64::from(counts.double_three) * self.double_three
            + f64::from(counts.open_three) * self.open_three
            + f64::from(counts.blocked_three) * self.blocked_three
            + f64::from(counts.open_two) * self.open_two
            + f64::from(counts.blocked_two) * self.blocked_two
    }

    /// Weights in severity order, most severe first
    pub fn ranked(&self) -> [(&'static str, f64); 9] {
        [
            ("five", self.five),
            ("open_four", self.open_four),
            ("double_four", self.double_four),
            ("blocked_four", self.blocked_four),
            ("double_three", self.double_three),
            ("open_three", self.open_three),
            ("blocked_three", self.blocked_three),
            ("open_two", self.open_two),
            ("blocked_two", self.blocked_two),
        ]
    }

    pub fn is_descending(&self) -> bool {
        let ranked = self.ranked();
        ranked.windows(2).all(|pair| pair[0].1 > pair[1].1) && ranked[8].1 > 0.0
    }
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_three_is_not_blocked_three() {
        let counts = classify(b"0011100");
        assert_eq!(counts.open_three, 1);
        assert_eq!(counts.blocked_three, 0);
        assert_eq!(counts.double_three, 0);
    }

    #[test]
    fn test_open_four_padded() {
        let counts = classify(b"x0111100x");
        assert_eq!(counts.open_four, 1);
        assert_eq!(counts.blocked_four, 0);
        assert_eq!(counts.five, 0);
    }

    #[test]
    fn test_blocked_four_variants() {
        for line in [b"x1111000x", b"00001111x", b"xx11011xx", b"x10111000", b"0011101xx"] {
            let counts = classify(line);
            assert_eq!(counts.blocked_four, 1, "{}", String::from_utf8_lossy(line));
            assert_eq!(counts.open_four, 0);
        }
    }

    #[test]
    fn test_five_counts_alongside_lower_tiers() {
        let counts = classify(b"011111000");
        assert_eq!(counts.five, 1);
        // 01111 is a substring too; tiers are independent
        assert_eq!(counts.blocked_four, 1);
    }

    #[test]
    fn test_double_three_overlapping() {
        let counts = classify(b"011101110");
        assert_eq!(counts.open_three, 1);
        assert_eq!(counts.double_three, 1);
    }

    #[test]
    fn test_open_four_implies_double_four() {
        let counts = classify(b"000111100");
        assert_eq!(counts.open_four, 1);
        assert_eq!(counts.double_four, 1);
    }

    #[test]
    fn test_twos() {
        let counts = classify(b"x00110xxx");
        assert_eq!(counts.open_two, 1);
        assert_eq!(counts.blocked_two, 0);

        let counts = classify(b"xx11000xx");
        assert_eq!(counts.open_two, 0);
        assert_eq!(counts.blocked_two, 1);
    }

    #[test]
    fn test_lone_stone_has_no_shape() {
        assert_eq!(classify(b"000010000"), PatternCounts::default());
        assert_eq!(classify(b"xxxx1xxxx"), PatternCounts::default());
    }

    #[test]
    fn test_walled_three_is_nothing() {
        // x111x cannot grow either way
        let counts = classify(b"xxx111xxx");
        assert_eq!(counts, PatternCounts::default());
    }

    #[test]
    fn test_counts_sum() {
        let a = classify(b"0011100");
        let b = classify(b"x0111100x");
        let total: PatternCounts = [a, b].into_iter().sum();
        assert_eq!(total.open_three, 1);
        assert_eq!(total.open_four, 1);
    }

    #[test]
    fn test_default_weights_hierarchy() {
        let w = PatternWeights::default();
        assert!(w.is_descending());
        assert!(w.five > w.open_four);
        assert!(w.open_four > w.blocked_four);
        assert!(w.blocked_four > w.open_three);
        assert!(w.open_three > w.blocked_three);
        assert!(w.blocked_three > w.open_two);
        assert!(w.open_two > w.blocked_two);
        assert!(w.double_three != w.open_three);
    }

    #[test]
    fn test_weights_score() {
        let counts = PatternCounts {
            open_three: 2,
            blocked_two: 1,
            ..PatternCounts::default()
        };
        assert_eq!(PatternWeights::default().score(&counts), 10_050.0);
    }

    #[test]
    fn test_non_descending_rejected() {
        let w = PatternWeights {
            open_two: 5_000.0,
            ..PatternWeights::default()
        };
        assert!(!w.is_descending());
    }
}

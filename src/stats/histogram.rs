use serde::Serialize;

use crate::data::model::Dataset;

/// Fixed bucket count used below [`STURGES_THRESHOLD`] values.
pub const SMALL_BUCKET_COUNT: usize = 5;
pub const STURGES_THRESHOLD: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// `"{start:.1}-{end:.1}"`
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Uniform-width histogram of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Number of buckets for `n` values: 5 for small samples, Sturges' rule
/// `ceil(log2(n) + 1)` otherwise.
pub fn bucket_count(n: usize) -> usize {
    if n < STURGES_THRESHOLD {
        SMALL_BUCKET_COUNT
    } else {
        ((n as f64).log2() + 1.0).ceil() as usize
    }
}

/// Histogram of `column`, or `None` when the column is unknown or holds no
/// numeric values.
pub fn histogram(dataset: &Dataset, column: &str) -> Option<Histogram> {
    if !dataset.has_column(column) {
        return None;
    }
    bin_values(column, &dataset.numeric_values(column))
}

/// Bin values into equal-width buckets over `[min, max]`. The maximum is
/// clamped into the last bucket, so a zero-width range (every value equal
/// to the maximum) lands entirely there. Non-finite values are ignored.
pub fn bin_values(column: &str, values: &[f64]) -> Option<Histogram> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }
    let k = bucket_count(values.len());
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Halved so that `max - min` stays finite for values near ±f64::MAX.
    let half_span = max / 2.0 - min / 2.0;

    let mut counts = vec![0usize; k];
    for &v in &values {
        let idx = if half_span > 0.0 {
            let pos = (v / 2.0 - min / 2.0) / half_span * k as f64;
            (pos.floor() as usize).min(k - 1)
        } else {
            k - 1
        };
        counts[idx] += 1;
    }

    let edge = |i: usize| {
        let t = i as f64 / k as f64;
        min * (1.0 - t) + max * t
    };
    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = edge(i);
            let end = edge(i + 1);
            Bucket {
                label: format!("{start:.1}-{end:.1}"),
                start,
                end,
                count,
            }
        })
        .collect();

    Some(Histogram {
        column: column.to_string(),
        buckets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::model::Cell;
    use proptest::prelude::*;

    #[test]
    fn bucket_count_switches_to_sturges() {
        assert_eq!(bucket_count(1), 5);
        assert_eq!(bucket_count(49), 5);
        assert_eq!(bucket_count(50), 7);
        assert_eq!(bucket_count(64), 7);
        assert_eq!(bucket_count(891), 11);
    }

    #[test]
    fn max_lands_in_last_bucket() {
        let h = bin_values("x", &[0.0, 1.0, 2.0, 3.0, 4.0, 10.0]).unwrap();
        assert_eq!(h.buckets.len(), 5);
        assert_eq!(h.buckets[4].count, 1);
        assert_eq!(h.buckets[0].count, 2);
        assert_eq!(h.buckets[0].label, "0.0-2.0");
        assert_eq!(h.buckets[4].label, "8.0-10.0");
        assert_eq!(h.total(), 6);
    }

    #[test]
    fn constant_column_fills_last_bucket() {
        let h = bin_values("x", &[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(h.buckets[4].count, 3);
        assert_eq!(h.buckets[0].label, "3.0-3.0");
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn extreme_range_keeps_max_in_last_bucket() {
        let ds = parse_csv("v\n-1e308\n0\n1e308\n".as_bytes()).unwrap();
        let h = histogram(&ds, "v").unwrap();
        let counts: Vec<usize> = h.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 1, 0, 1]);
        assert!(h.buckets.iter().all(|b| b.start.is_finite() && b.end.is_finite()));
        assert_eq!(h.buckets[4].end, 1e308);
    }

    #[test]
    fn overflowing_literal_is_not_binned() {
        let ds = parse_csv("v\n1\n1e400\n".as_bytes()).unwrap();
        let h = histogram(&ds, "v").unwrap();
        assert_eq!(h.total(), 1);
        assert_eq!(h.buckets[4].count, 1);

        let h = bin_values("v", &[1.0, f64::INFINITY, 3.0]).unwrap();
        assert_eq!(h.total(), 2);
        assert_eq!(h.buckets[4].count, 1);
    }

    #[test]
    fn histogram_skips_unknown_and_empty_columns() {
        let ds = Dataset::from_rows(
            &["Age", "Cabin"],
            vec![vec![Cell::Integer(22), Cell::Null], vec![Cell::Integer(38), Cell::Null]],
        );
        assert!(histogram(&ds, "Fare").is_none());
        assert!(histogram(&ds, "Cabin").is_none());
        let age = histogram(&ds, "Age").unwrap();
        assert_eq!(age.column, "Age");
        assert_eq!(age.total(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_every_value_lands_in_one_bucket(
            values in prop::collection::vec(
                prop_oneof![-1e6f64..1e6, prop::num::f64::NORMAL],
                1..300,
            )
        ) {
            let h = bin_values("v", &values).unwrap();
            prop_assert_eq!(h.buckets.len(), bucket_count(values.len()));
            prop_assert_eq!(h.total(), values.len());
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let max_count = values.iter().filter(|&&v| v == max).count();
            prop_assert!(h.buckets.last().unwrap().count >= max_count);
        }
    }
}

//! Aggregation pipeline shared by all four chart widgets.
//!
//! One pass over the raw records: each record is mapped to a bucket key by
//! [`bucket::bucket_key_and_label`] and summed into its bucket. Buckets come
//! out in the order their keys were first seen while scanning the input,
//! not chronologically sorted.

mod bucket;

pub use bucket::{bucket_key_and_label, month_name, parse_timestamp, week_of_year};

use std::collections::HashMap;

use crate::types::{Bucket, BucketKey, Granularity, RawRecord};

/// Group records by time bucket and sum their values.
///
/// Records whose timestamp cannot be parsed (Weekly/Monthly only) are
/// logged and dropped; the rest of the batch still aggregates. Under
/// Daily the timestamp string itself is the key, so each distinct string
/// is its own bucket and identical strings merge.
pub fn aggregate(records: &[RawRecord], granularity: Granularity) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<BucketKey, usize> = HashMap::new();

    for record in records {
        let (key, label) = match bucket_key_and_label(&record.timestamp, granularity) {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("Skipping record: {}", e);
                continue;
            }
        };

        match index.get(&key) {
            Some(&i) => buckets[i].total += record.value,
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    key,
                    label,
                    total: record.value,
                });
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records(pairs: &[(&str, f64)]) -> Vec<RawRecord> {
        pairs
            .iter()
            .map(|(ts, v)| RawRecord::new(*ts, *v))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        for granularity in Granularity::ALL {
            assert!(aggregate(&[], granularity).is_empty());
        }
    }

    #[test]
    fn test_daily_identity() {
        let input = records(&[
            ("2024-01-03", 3.0),
            ("2024-01-01", 1.0),
            ("2024-01-02", 2.0),
        ]);
        let buckets = aggregate(&input, Granularity::Daily);
        assert_eq!(buckets.len(), input.len());
        for (bucket, record) in buckets.iter().zip(&input) {
            assert_eq!(bucket.label, record.timestamp);
            assert_eq!(bucket.total, record.value);
        }
    }

    #[test]
    fn test_daily_identical_strings_merge() {
        // Two records with byte-identical timestamps share one daily bucket.
        let input = records(&[
            ("2024-01-01T00:00:00Z", 5.0),
            ("2024-01-01T00:00:00Z", 7.0),
        ]);
        let buckets = aggregate(&input, Granularity::Daily);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total, 12.0);
    }

    #[test]
    fn test_weekly_merges_same_week() {
        let input = records(&[
            ("2024-01-01", 1.0),
            ("2024-01-02", 2.0),
            ("2024-01-03", 4.0),
        ]);
        let buckets = aggregate(&input, Granularity::Weekly);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Week 1-2024");
        assert_eq!(buckets[0].total, 7.0);
    }

    #[test]
    fn test_monthly_sum_invariant() {
        let input = records(&[
            ("2024-01-10", 1.5),
            ("2024-02-05", 2.5),
            ("2024-01-20", 4.0),
            ("2024-02-28", 8.0),
        ]);
        let buckets = aggregate(&input, Granularity::Monthly);
        let bucket_sum: f64 = buckets.iter().map(|b| b.total).sum();
        let record_sum: f64 = input.iter().map(|r| r.value).sum();
        assert_eq!(bucket_sum, record_sum);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "January 2024");
        assert_eq!(buckets[0].total, 5.5);
        assert_eq!(buckets[1].label, "February 2024");
        assert_eq!(buckets[1].total, 10.5);
    }

    #[test]
    fn test_first_seen_order_not_chronological() {
        // March arrives before January; output keeps arrival order.
        let input = records(&[
            ("2024-03-15", 1.0),
            ("2024-01-15", 2.0),
            ("2024-03-20", 3.0),
        ]);
        let buckets = aggregate(&input, Granularity::Monthly);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "March 2024");
        assert_eq!(buckets[0].total, 4.0);
        assert_eq!(buckets[1].label, "January 2024");
    }

    #[test]
    fn test_invalid_timestamp_dropped_not_fatal() {
        let input = records(&[
            ("2024-01-01", 1.0),
            ("not-a-date", 99.0),
            ("2024-01-02", 2.0),
        ]);
        let buckets = aggregate(&input, Granularity::Weekly);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total, 3.0);
    }

    #[test]
    fn test_same_month_different_years_stay_apart() {
        let input = records(&[("2023-06-01", 1.0), ("2024-06-01", 2.0)]);
        let buckets = aggregate(&input, Granularity::Monthly);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "June 2023");
        assert_eq!(buckets[1].label, "June 2024");
    }

    #[test]
    fn test_aggregate_is_pure() {
        // Same input, same granularity, same output; no hidden state.
        let input = records(&[("2024-01-01", 1.0), ("2024-01-08", 2.0)]);
        let first = aggregate(&input, Granularity::Weekly);
        let second = aggregate(&input, Granularity::Weekly);
        assert_eq!(first, second);
    }
}

//! Demo dataset generation.
//!
//! Writes a `data.json` feed so the dashboard has something to show without
//! a live endpoint. Values are random but the date range is fixed.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::types::RawRecord;

/// Generate `days` consecutive daily records starting at `start`.
pub fn generate_records(start: NaiveDate, days: usize) -> Vec<RawRecord> {
    let mut rng = rand::thread_rng();
    (0..days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            RawRecord::new(
                format!("{}T00:00:00Z", date.format("%Y-%m-%d")),
                rng.gen_range(10.0..100.0_f64).floor(),
            )
        })
        .collect()
}

/// Write a generated feed to `path` as a pretty-printed JSON array.
pub fn write_sample_feed(path: &str, days: usize) -> anyhow::Result<()> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixed date");
    let records = generate_records(start, days);
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_record_count_and_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = generate_records(start, 90);
        assert_eq!(records.len(), 90);
        assert_eq!(records[0].timestamp, "2024-01-01T00:00:00Z");
        assert_eq!(records[89].timestamp, "2024-03-30T00:00:00Z");
        assert!(records.iter().all(|r| r.value >= 10.0 && r.value < 100.0));
    }

    #[test]
    fn test_sample_feed_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_sample_feed(path.to_str().unwrap(), 10).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let records: Vec<RawRecord> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(records.len(), 10);
    }
}

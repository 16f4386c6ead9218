//! Dataset loading.
//!
//! The feed is a JSON array of `{timestamp, value}` objects, served either
//! over HTTP or from a local file. Records come back exactly as delivered:
//! no sorting, no de-duplication, no timestamp validation (bad timestamps
//! surface later, per record, in the aggregator).

use crate::error::DataError;
use crate::types::RawRecord;

/// Load the raw record set from `source`.
///
/// `http://` and `https://` sources are fetched over the network; anything
/// else is treated as a local file path. Called once per chart widget when
/// it mounts; granularity changes never re-fetch.
pub async fn load_records(source: &str) -> Result<Vec<RawRecord>, DataError> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_http(source).await?
    } else {
        tokio::fs::read(source)
            .await
            .map_err(|e| DataError::fetch(source, e))?
    };

    let records: Vec<RawRecord> = serde_json::from_slice(&bytes)?;
    Ok(records)
}

async fn fetch_http(url: &str) -> Result<Vec<u8>, DataError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| DataError::fetch(url, e))?;
    if !response.status().is_success() {
        return Err(DataError::fetch(
            url,
            format!("server returned {}", response.status()),
        ));
    }
    let bytes = response.bytes().await.map_err(|e| DataError::fetch(url, e))?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_feed(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_records_from_file() {
        let file = write_feed(
            r#"[
                {"timestamp": "2024-01-01", "value": 1.5},
                {"timestamp": "2024-01-02", "value": 2.5}
            ]"#,
        );
        let records = load_records(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RawRecord::new("2024-01-01", 1.5));
        assert_eq!(records[1].value, 2.5);
    }

    #[tokio::test]
    async fn test_load_preserves_arrival_order() {
        let file = write_feed(
            r#"[
                {"timestamp": "2024-03-01", "value": 3.0},
                {"timestamp": "2024-01-01", "value": 1.0}
            ]"#,
        );
        let records = load_records(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(records[0].timestamp, "2024-03-01");
        assert_eq!(records[1].timestamp, "2024-01-01");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let err = load_records("/definitely/not/here.json").await.unwrap_err();
        assert!(matches!(err, DataError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_non_array_payload_is_malformed() {
        let file = write_feed(r#"{"timestamp": "2024-01-01", "value": 1.0}"#);
        let err = load_records(file.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_record_missing_field_is_malformed() {
        let file = write_feed(r#"[{"timestamp": "2024-01-01"}]"#);
        let err = load_records(file.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }
}

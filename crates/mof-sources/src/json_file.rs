//! JSON file data source: reads the `{ "meta": ..., "mof": [...] }`
//! directory document from disk.

use crate::DataSource;
use async_trait::async_trait;
use mof_core::{Directory, Error, Record, Result};
use std::path::{Path, PathBuf};

/// Reads the directory document at `path`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document, `meta` included.
    pub async fn read_directory(&self) -> Result<Directory> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "data file unreadable");
            Error::DataUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        parse_directory(&text).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "data file malformed");
            Error::DataUnavailable(format!("{}: {e}", self.path.display()))
        })
    }
}

/// Parse a directory document from a string.
pub fn parse_directory(text: &str) -> Result<Directory> {
    Ok(serde_json::from_str(text)?)
}

#[async_trait]
impl DataSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Record>> {
        let directory = self.read_directory().await?;

        if let Some(ref meta) = directory.meta {
            tracing::info!(
                source = meta.source.as_deref().unwrap_or("-"),
                method = meta.method.as_deref().unwrap_or("-"),
                generated_at = ?meta.generated_at(),
                declared_total = ?meta.total,
                "directory metadata"
            );
        }

        if directory.mof.is_empty() {
            tracing::error!(path = %self.path.display(), "data file has no records");
            return Err(Error::DataUnavailable(format!(
                "{}: no records",
                self.path.display()
            )));
        }

        tracing::info!(count = directory.mof.len(), "records loaded");
        Ok(directory.mof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "meta": {"total": 2, "generated_at": "2025-01-15 10:30:00", "method": "sample"},
        "mof": [
            {"id": 1, "name": "Pierre Hermé", "specialty": "Pâtissier-Confiseur",
             "address": "72 Rue Bonaparte, 75006 Paris", "year": 1997,
             "website": "https://www.pierreherme.com",
             "coordinates": {"lat": 48.8534, "lon": 2.3328}},
            {"id": 2, "name": "Michel Fouchereau", "specialty": "Fromager",
             "address": null, "year": null, "website": null,
             "coordinates": {"lat": null, "lon": null}}
        ]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_records() {
        let file = write_temp(SAMPLE);
        let records = JsonFileSource::new(file.path()).load().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].coordinates.is_some());
        assert!(records[1].coordinates.is_none());
    }

    #[tokio::test]
    async fn reads_meta() {
        let file = write_temp(SAMPLE);
        let dir = JsonFileSource::new(file.path()).read_directory().await.unwrap();
        let meta = dir.meta.unwrap();
        assert_eq!(meta.total, Some(2));
        assert!(meta.generated_at().is_some());
    }

    #[tokio::test]
    async fn empty_collection_is_unavailable() {
        let file = write_temp(r#"{"mof": []}"#);
        let err = JsonFileSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("nope.json"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_file_is_unavailable() {
        let file = write_temp("{ not json");
        let err = JsonFileSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
    }
}

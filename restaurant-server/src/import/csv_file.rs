//! Local CSV export of the restaurant sheet

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::source::{SheetData, TableSource};
use super::ImportError;

/// Reads a CSV file; every record becomes a row of string cells
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}

#[async_trait]
impl TableSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<SheetData, ImportError> {
        let path = self.path.clone();
        let rows = tokio::task::spawn_blocking(move || read_rows(&path))
            .await
            .map_err(|e| ImportError::Source(format!("CSV reader task failed: {e}")))??;
        Ok(SheetData::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_ragged_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,address,phone_number").unwrap();
        writeln!(file, "Cafe A,123 St,555-0100").unwrap();
        writeln!(file, "Tiny").unwrap();
        writeln!(file, "\"Comma, Inc\",1 Ave,,extra").unwrap();
        file.flush().unwrap();

        let data = CsvSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(data.headers, vec!["name", "address", "phone_number"]);
        assert_eq!(data.rows.len(), 3);
        assert_eq!(data.rows[1], vec!["Tiny"]);
        assert_eq!(data.rows[2], vec!["Comma, Inc", "1 Ave", "", "extra"]);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let data = CsvSource::new(file.path()).fetch().await.unwrap();
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CsvSource::new(dir.path().join("none.csv")).fetch().await;
        assert!(matches!(result, Err(ImportError::Csv(_))));
    }
}

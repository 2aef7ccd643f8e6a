//! Import Job
//!
//! One-shot replacement of the record store from a tabular source: fetch
//! the whole sheet, drop and recreate the table, then insert every data
//! row positionally in a single transaction. It must run while the API is
//! not serving; nothing enforces that.

pub mod csv_file;
pub mod sheets;
pub mod source;

pub use csv_file::CsvSource;
pub use sheets::{ServiceAccountKey, SheetsSource};
pub use source::{SheetData, TableSource};

use std::time::Instant;

use shared::Cell;
use thiserror::Error;

use crate::db::{RepoError, Store};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] RepoError),

    #[error("source error: {0}")]
    Source(String),
}

/// Where the Import Job reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Sheets {
        service_account_file: String,
        sheet_id: String,
        range: String,
    },
    Csv {
        path: String,
    },
}

/// Import Job configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | restaurants.db | Target SQLite file |
/// | IMPORT_SOURCE | sheets | `sheets` or `csv` |
/// | SERVICE_ACCOUNT_FILE | service_account.json | Google service-account key |
/// | SHEET_ID | (required for sheets) | Spreadsheet id |
/// | SHEET_RANGE | DB!A:AC | A1 range covering the 29 data columns |
/// | CSV_PATH | (required for csv) | Local CSV export |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub database_path: String,
    pub source: SourceKind,
}

impl ImportConfig {
    pub fn from_env() -> Result<Self, ImportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ImportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| ImportError::Source(format!("{key} must be set")))
        };

        let source = match var("IMPORT_SOURCE").as_deref().unwrap_or("sheets") {
            "sheets" => SourceKind::Sheets {
                service_account_file: var("SERVICE_ACCOUNT_FILE")
                    .unwrap_or_else(|| "service_account.json".into()),
                sheet_id: required("SHEET_ID")?,
                range: var("SHEET_RANGE").unwrap_or_else(|| "DB!A:AC".into()),
            },
            "csv" => SourceKind::Csv {
                path: required("CSV_PATH")?,
            },
            other => {
                return Err(ImportError::Source(format!(
                    "unknown IMPORT_SOURCE '{other}', expected 'sheets' or 'csv'"
                )));
            }
        };

        Ok(Self {
            database_path: var("DATABASE_PATH").unwrap_or_else(|| "restaurants.db".into()),
            source,
        })
    }
}

/// Instantiate the configured source
pub async fn build_source(config: &ImportConfig) -> Result<Box<dyn TableSource>, ImportError> {
    match &config.source {
        SourceKind::Sheets {
            service_account_file,
            sheet_id,
            range,
        } => {
            let key = ServiceAccountKey::from_file(service_account_file).await?;
            Ok(Box::new(SheetsSource::new(key, sheet_id, range)))
        }
        SourceKind::Csv { path } => Ok(Box::new(CsvSource::new(path))),
    }
}

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub headers: usize,
    pub rows: usize,
    pub padded: usize,
    pub truncated: usize,
}

/// Replace the store's contents with the source's data rows
///
/// The source is read before the table is dropped, so a failing fetch
/// leaves the previous data in place.
pub async fn run_import(source: &dyn TableSource, store: &Store) -> Result<ImportSummary, ImportError> {
    let start = Instant::now();
    tracing::info!(source = %source.describe(), "Import started");

    let data = source.fetch().await?;
    tracing::info!(
        headers = data.headers.len(),
        rows = data.rows.len(),
        "Fetched source data"
    );
    tracing::debug!(headers = ?data.headers, "Source headers");

    let rows: Vec<Vec<Cell>> = data
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(Cell::Text).collect())
        .collect();

    store.init_schema().await?;
    let stats = store.bulk_insert(&rows, &data.headers).await?;

    let summary = ImportSummary {
        headers: data.headers.len(),
        rows: stats.inserted,
        padded: stats.padded,
        truncated: stats.truncated,
    };
    tracing::info!(
        rows = summary.rows,
        padded = summary.padded,
        truncated = summary.truncated,
        elapsed_ms = %start.elapsed().as_millis(),
        "Import finished"
    );
    Ok(summary)
}

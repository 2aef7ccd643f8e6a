use async_trait::async_trait;

use super::ImportError;

/// Tabular data as read from a source: the first row is the header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetData {
    /// Split raw rows into the header row and data rows
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0);
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// A tabular source the Import Job can read
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Short name for logs
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<SheetData, ImportError>;
}

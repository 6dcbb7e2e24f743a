use std::fs;
use std::io;
use std::path::Path;

use crate::state::tabular::{TableData, TableError};

#[derive(Debug)]
pub enum JsonIoError {
    Io(io::Error),
    Parse(serde_json::Error),
    Shape(TableError),
}

impl std::fmt::Display for JsonIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonIoError::Io(e) => write!(f, "IO error: {e}"),
            JsonIoError::Parse(e) => write!(f, "JSON parse error: {e}"),
            JsonIoError::Shape(e) => write!(f, "invalid table: {e}"),
        }
    }
}

impl std::error::Error for JsonIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonIoError::Io(e) => Some(e),
            JsonIoError::Parse(e) => Some(e),
            JsonIoError::Shape(e) => Some(e),
        }
    }
}

impl From<io::Error> for JsonIoError {
    fn from(e: io::Error) -> Self {
        JsonIoError::Io(e)
    }
}

impl From<serde_json::Error> for JsonIoError {
    fn from(e: serde_json::Error) -> Self {
        JsonIoError::Parse(e)
    }
}

impl From<TableError> for JsonIoError {
    fn from(e: TableError) -> Self {
        JsonIoError::Shape(e)
    }
}

pub fn load_table(path: &Path) -> Result<TableData, JsonIoError> {
    let content = fs::read_to_string(path)?;
    let table = parse_table(&content)?;
    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );
    Ok(table)
}

pub fn parse_table(content: &str) -> Result<TableData, JsonIoError> {
    let table: TableData = serde_json::from_str(content)?;
    table.validate()?;
    Ok(table)
}

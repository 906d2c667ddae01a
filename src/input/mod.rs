use std::path::Path;

pub mod maps;
pub mod reader;

pub use maps::{MapAsset, list_map_assets};
use reader::open_csv;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("file name is not valid UTF-8: {0}")]
    NonUtf8Name(String),
    #[error("input has no header row: {0}")]
    EmptyInput(String),
    #[error("malformed row at line {line}: column {column} requested but row has {len} fields")]
    MalformedRow { line: u64, column: usize, len: usize },
}

/// Reads only the header row of a CSV table. The reader is dropped before
/// returning, so later extraction passes reopen the file independently.
pub fn read_header(path: &Path) -> Result<Vec<String>, InputError> {
    let mut reader = open_csv(path)?;
    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(InputError::EmptyInput(path.display().to_string()));
    }
    Ok(record.iter().map(str::to_string).collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use csv::StringRecord;

use crate::input::InputError;
use crate::input::reader::open_csv;

/// Key to value overlay for one value column. Values are kept verbatim,
/// empty strings included.
pub type Mapping = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub mapping: Mapping,
    /// Data rows read, header excluded.
    pub rows: usize,
    /// Rows whose key had already been seen and whose value replaced the earlier one.
    pub overwritten: usize,
}

struct KeyValueAccumulator {
    key_column: usize,
    value_column: usize,
    extraction: Extraction,
}

impl KeyValueAccumulator {
    fn new(key_column: usize, value_column: usize) -> Self {
        Self {
            key_column,
            value_column,
            extraction: Extraction::default(),
        }
    }

    fn push_row(
        &mut self,
        line: u64,
        key: Option<&str>,
        value: Option<&str>,
        len: usize,
    ) -> Result<(), InputError> {
        let Some(key) = key else {
            return Err(InputError::MalformedRow {
                line,
                column: self.key_column,
                len,
            });
        };
        let Some(value) = value else {
            return Err(InputError::MalformedRow {
                line,
                column: self.value_column,
                len,
            });
        };

        self.extraction.rows += 1;
        // Last row wins; earlier values for the same key are dropped.
        if let Some(previous) = self
            .extraction
            .mapping
            .insert(key.to_string(), value.to_string())
        {
            self.extraction.overwritten += 1;
            tracing::debug!(
                "duplicate key {} at line {} replaces value {:?}",
                key,
                line,
                previous
            );
        }
        Ok(())
    }

    fn finish(self) -> Extraction {
        self.extraction
    }
}

/// Builds the key/value mapping for one value column. The first record is
/// the header and is skipped; a table with no data rows yields an empty
/// mapping.
pub fn extract_key_values<I>(
    table: I,
    key_column: usize,
    value_column: usize,
) -> Result<Extraction, InputError>
where
    I: IntoIterator<Item = Result<StringRecord, InputError>>,
{
    let mut acc = KeyValueAccumulator::new(key_column, value_column);
    for (idx, record) in table.into_iter().enumerate() {
        let record = record?;
        if idx == 0 {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        acc.push_row(
            line,
            record.get(key_column),
            record.get(value_column),
            record.len(),
        )?;
    }
    Ok(acc.finish())
}

/// Streams a CSV file and builds the mapping for one value column.
pub fn read_key_values(
    path: &Path,
    key_column: usize,
    value_column: usize,
) -> Result<Extraction, InputError> {
    let mut reader = open_csv(path)?;
    let mut records = reader
        .records()
        .map(|r| r.map_err(InputError::from))
        .peekable();
    if records.peek().is_none() {
        return Err(InputError::EmptyInput(path.display().to_string()));
    }
    extract_key_values(records, key_column, value_column)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_extract.rs"]
mod tests;

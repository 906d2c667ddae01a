use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InputError::MissingInput(path.display().to_string()),
        _ => InputError::Io(e),
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(
            file,
        )))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Header handling is left to callers: the first record is the header row.
/// Ragged rows are accepted here and checked where columns are accessed.
/// Blank lines are skipped by the reader and never reach the extractor.
pub fn open_csv(path: &Path) -> Result<csv::Reader<Box<dyn Read>>, InputError> {
    let source = open_maybe_gz(path)?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source))
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

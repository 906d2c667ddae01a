use std::path::{Path, PathBuf};

use crate::pipeline::stage2_sweep::{SweepError, write_text};
use crate::report::{SUMMARY_FILE, SummaryData};

pub fn render_summary_json(data: &SummaryData<'_>) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}

/// Writes `summary.json` into the output root and returns its path.
pub fn write_summary(data: &SummaryData<'_>, output_root: &Path) -> Result<PathBuf, SweepError> {
    let path = output_root.join(SUMMARY_FILE);
    let json = render_summary_json(data)?;
    write_text(&path, &json)?;
    Ok(path)
}

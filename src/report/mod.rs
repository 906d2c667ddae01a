pub mod json;

use serde::Serialize;

use crate::pipeline::stage2_sweep::SweepReport;
use crate::render::RenderOptions;

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData<'a> {
    pub tool: &'a str,
    pub tool_version: &'a str,
    pub options: &'a RenderOptions,
    pub artifact_count: usize,
    #[serde(flatten)]
    pub sweep: &'a SweepReport,
}

impl<'a> SummaryData<'a> {
    pub fn new(sweep: &'a SweepReport, options: &'a RenderOptions) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            tool_version: env!("CARGO_PKG_VERSION"),
            options,
            artifact_count: sweep.artifact_count(),
            sweep,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;

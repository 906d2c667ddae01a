use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::input::{InputError, MapAsset, list_map_assets, read_header};
use crate::pipeline::stage1_extract::read_key_values;
use crate::render::{MapRenderer, RenderError, RenderOptions, RenderRequest};

/// Column holding reaction identifiers.
pub const KEY_COLUMN: usize = 0;

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub input: PathBuf,
    pub output_root: PathBuf,
    pub map_dir: PathBuf,
    pub options: RenderOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub column_index: usize,
    pub rows: usize,
    pub keys: usize,
    pub overwritten: usize,
    pub artifacts: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub input: PathBuf,
    pub output_root: PathBuf,
    pub map_dir: PathBuf,
    pub map_assets: Vec<String>,
    pub columns: Vec<ColumnReport>,
}

impl SweepReport {
    pub fn artifact_count(&self) -> usize {
        self.columns.iter().map(|c| c.artifacts.len()).sum()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to render map {asset} for column {column}: {source}")]
    AssetRenderFailure {
        column: String,
        asset: String,
        #[source]
        source: RenderError,
    },
    #[error("cannot write {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("column name {0:?} cannot be used as an output directory name")]
    InvalidColumnName(String),
    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directory holding one column's pages. An empty column name has no
/// subdirectory of its own and writes straight into the output root.
pub fn column_dir(output_root: &Path, column: &str) -> PathBuf {
    if column.is_empty() {
        output_root.to_path_buf()
    } else {
        output_root.join(column)
    }
}

pub fn artifact_path(output_root: &Path, column: &str, asset: &MapAsset) -> PathBuf {
    column_dir(output_root, column).join(format!("{}_{}.html", column, asset.file_name))
}

/// Renders every (value column, map asset) pair of the input table.
///
/// Columns are visited in header order and assets in file-name order. The
/// first failure aborts the sweep; anything already written stays on disk.
pub fn run_sweep(
    config: &SweepConfig,
    renderer: &dyn MapRenderer,
) -> Result<SweepReport, SweepError> {
    ensure_dir(&config.output_root)?;

    let header = read_header(&config.input)?;
    if header.len() <= KEY_COLUMN + 1 {
        tracing::warn!(
            "{} has no value columns; nothing to render",
            config.input.display()
        );
    }

    let assets = list_map_assets(&config.map_dir)?;
    if assets.is_empty() {
        tracing::warn!("no map assets found in {}", config.map_dir.display());
    }

    let mut columns = Vec::with_capacity(header.len().saturating_sub(1));
    for (idx, name) in header.iter().enumerate().skip(KEY_COLUMN + 1) {
        check_column_name(name)?;
        if header[KEY_COLUMN + 1..idx].contains(name) {
            tracing::warn!(
                "column name {} appears more than once; its outputs will be overwritten",
                name
            );
        }

        ensure_dir(&column_dir(&config.output_root, name))?;

        let extraction = read_key_values(&config.input, KEY_COLUMN, idx)?;
        if extraction.overwritten > 0 {
            tracing::warn!(
                "column {}: {} duplicate keys, last value kept",
                name,
                extraction.overwritten
            );
        }
        tracing::info!(
            "column {}: {} rows, {} keys, rendering {} maps",
            name,
            extraction.rows,
            extraction.mapping.len(),
            assets.len()
        );

        let mut artifacts = Vec::with_capacity(assets.len());
        for asset in &assets {
            let request = RenderRequest {
                column: name,
                asset,
                overlay: &extraction.mapping,
            };
            let html = renderer
                .render(&request, &config.options)
                .map_err(|source| SweepError::AssetRenderFailure {
                    column: name.clone(),
                    asset: asset.file_name.clone(),
                    source,
                })?;

            let path = artifact_path(&config.output_root, name, asset);
            write_text(&path, &html)?;
            tracing::debug!("wrote {}", path.display());
            artifacts.push(path);
        }

        columns.push(ColumnReport {
            name: name.clone(),
            column_index: idx,
            rows: extraction.rows,
            keys: extraction.mapping.len(),
            overwritten: extraction.overwritten,
            artifacts,
        });
    }

    Ok(SweepReport {
        input: config.input.clone(),
        output_root: config.output_root.clone(),
        map_dir: config.map_dir.clone(),
        map_assets: assets.into_iter().map(|a| a.file_name).collect(),
        columns,
    })
}

fn check_column_name(name: &str) -> Result<(), SweepError> {
    let invalid = name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(SweepError::InvalidColumnName(name.to_string()));
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), SweepError> {
    fs::create_dir_all(path).map_err(|source| SweepError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_text(path: &Path, contents: &str) -> Result<(), SweepError> {
    let write = || -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(contents.as_bytes())?;
        w.flush()
    };
    write().map_err(|source| SweepError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_sweep.rs"]
mod tests;

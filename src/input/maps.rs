use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::input::InputError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapAsset {
    pub file_name: String,
    pub path: PathBuf,
}

/// Every regular file in `dir` is a map asset, whatever its extension.
/// Assets are returned sorted by file name so output order does not depend
/// on the platform's directory listing. File names end up in output paths,
/// so a name that is not valid UTF-8 is an error rather than a lossy copy.
pub fn list_map_assets(dir: &Path) -> Result<Vec<MapAsset>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "map directory {}",
            dir.display()
        )));
    }

    let mut assets = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            tracing::warn!(
                "skipping subdirectory {} in map directory",
                path.display()
            );
            continue;
        }
        let file_name = entry
            .file_name()
            .into_string()
            .map_err(|_| InputError::NonUtf8Name(path.display().to_string()))?;
        assets.push(MapAsset { file_name, path });
    }
    assets.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::debug!("found {} map assets in {}", assets.len(), dir.display());
    Ok(assets)
}

use std::path::Path;

use quiz_core::Catalog;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;

/// Load the catalog named by `config`, or the built-in one.
pub fn load_catalog(config: &Config) -> Result<Catalog, AppError> {
    match config.catalog_path() {
        Some(path) => load_catalog_file(&path),
        None => {
            info!("using built-in catalog");
            Ok(Catalog::builtin()?)
        }
    }
}

pub fn load_catalog_file(path: &Path) -> Result<Catalog, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = Catalog::from_json(&content)?;
    info!(path = %path.display(), "catalog loaded from file");
    Ok(catalog)
}

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON catalog file. `None` uses the catalog embedded in `quiz-core`.
    pub catalog_path: Option<String>,
    /// TCP address to serve MCP on (e.g. "127.0.0.1:7300"). `None` serves on stdio.
    pub listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `LIGHTBOX_CATALOG_PATH`: path to a catalog JSON file (must exist when set)
    /// - `MCP_TCP_LISTEN_ADDR`: serve over TCP instead of stdio
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("LIGHTBOX_CATALOG_PATH").ok(),
            std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        )
    }

    fn from_vars(
        catalog_path: Option<String>,
        listen_addr: Option<String>,
    ) -> Result<Self, AppError> {
        let catalog_path = catalog_path.filter(|p| !p.trim().is_empty());
        if let Some(path) = &catalog_path {
            if !Path::new(path).is_file() {
                return Err(AppError::Config(format!(
                    "LIGHTBOX_CATALOG_PATH points to a missing file: {path}"
                )));
            }
        }

        Ok(Self {
            catalog_path,
            listen_addr: listen_addr.filter(|a| !a.trim().is_empty()),
        })
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path.as_deref().map(PathBuf::from)
    }
}

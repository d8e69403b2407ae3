//! Module manifests read from disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Description of a loadable UI module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleManifest {
    pub name: String,
    pub version: String,
    /// Entry point of the module bundle.
    pub entry: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Errors while reading a manifest.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read and parse the manifest at `path`.
pub async fn read_manifest(path: PathBuf) -> Result<ModuleManifest, CatalogError> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
    parse_manifest(&path, &content)
}

pub fn parse_manifest(path: &Path, content: &str) -> Result<ModuleManifest, CatalogError> {
    toml::from_str(content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

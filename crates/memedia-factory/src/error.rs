use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("failed to parse support tables: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

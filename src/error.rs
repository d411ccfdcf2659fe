//! Failures at the I/O boundary. Normalization itself cannot fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    #[error("failed to read {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid replacement pattern: {0}")]
    Pattern(#[from] regex::Error),
}

use std::io;
use thiserror::Error;

/// Failures while reading the word-pair data file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read word pairs from {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("word pair file {path} is not a list of [source, target] pairs: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("word pair file {0} contains no pairs")]
    Empty(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got {value:?}")]
    InvalidPort { name: &'static str, value: String },
}

use std::path::PathBuf;

pub mod config;

pub type Result<T> = core::result::Result<T, BenchError>;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("undecodable status body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid pending count {value:?}: {source}")]
    PendingCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config yaml: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl BenchError {
    pub fn transport(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Transport { url: url.into(), message: err.to_string() }
    }
}

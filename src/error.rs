use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("unknown weather condition {0:?}")]
    UnknownWeather(String),
}

/// Startup failure of the inference artifact. Terminal for the process.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("model file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read meta at {}: {source}", path.display())]
    ReadMeta {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse meta at {}: {source}", path.display())]
    ParseMeta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("meta feat_list {found:?} does not match expected columns {expected:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("meta in_dim is {found}, expected {expected}")]
    InputDim { expected: usize, found: usize },

    #[error("failed to load TorchScript {}: {source}", path.display())]
    Module {
        path: PathBuf,
        #[source]
        source: tch::TchError,
    },

    #[error("warmup forward failed: {0}")]
    Warmup(#[source] PredictionError),
}

/// Failure of a single inference call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("model returned an empty output")]
    EmptyOutput,

    #[error("inference failed: {0}")]
    Inference(String),
}

impl From<tch::TchError> for PredictionError {
    fn from(e: tch::TchError) -> Self {
        PredictionError::Inference(e.to_string())
    }
}

/// Everything a single `predict` call can report back to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Inference(#[from] PredictionError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid port {value:?}: {source}")]
    Port {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

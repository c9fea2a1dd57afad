use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("test report not found: {0}")]
    ReportNotFound(String),

    #[error("malformed report from {origin}: {error}")]
    MalformedReport {
        origin: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("artifact error: {0}")]
    Artifact(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read resource {path}: {source}")]
    ReadResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed style resource {path}: {message}")]
    MalformedStyle { path: PathBuf, message: String },

    #[error("failed to write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Config(#[from] serde_json::Error),
}

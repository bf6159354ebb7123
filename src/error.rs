use thiserror::Error;

/// Everything that can go wrong between the wire and a finished snapshot.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("bootstrap request returned status {0}")]
    FetchStatus(u16),

    #[error("bootstrap request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bootstrap payload did not match the expected shape: {0}")]
    Schema(String),

    #[error("could not read `{field}` as a number (got {value:?})")]
    Conversion { field: &'static str, value: String },

    #[error("no {entity} matches {key}")]
    Lookup { entity: &'static str, key: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

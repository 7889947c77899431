use std::fmt;

/// Unified error type for the crashlens crate.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// A caller-supplied filter value violated the criteria contract.
    InvalidFilterValue(String),
    /// The dataset could not be read or parsed.
    DatasetLoad(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidFilterValue(msg) => write!(f, "invalid filter value: {msg}"),
            EngineError::DatasetLoad(msg) => write!(f, "dataset load failed: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type alias using [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::DatasetLoad(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::DatasetLoad(err.to_string())
    }
}

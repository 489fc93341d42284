use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x:      i64,
        y:      i64,
        width:  usize,
        height: usize,
    },

    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("Malformed command '{line}': {reason}")]
    MalformedCommand { line: String, reason: String },

    #[error("Density must be within [0, 1], got {0}")]
    InvalidDensity(f64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("binary message length {len} is not a multiple of 4")]
    InvalidBitLength { len: usize },

    #[error("binary message contains invalid character {ch:?}")]
    InvalidBitValue { ch: char },

    #[error("recovered 16-QAM point outside the constellation radius (squared distance {distance})")]
    SymbolOutOfBounds { distance: f64 },

    #[error("missing configuration parameter: {0}")]
    MissingParameter(String),

    #[error("invalid configuration parameter: {0}")]
    InvalidParameter(String),

    #[error("unknown generation tag: {0:?}")]
    UnknownGeneration(String),
}

pub type Result<T> = std::result::Result<T, ModemError>;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid simulation parameter: {0}")]
    InvalidParam(&'static str),
    #[error("simulated source exhausted after {0} samples")]
    Exhausted(usize),
}

pub type Result<T> = std::result::Result<T, SimError>;

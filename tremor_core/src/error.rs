use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssessError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid state: {0}")]
    State(String),
    #[error("motion source error: {0}")]
    Source(String),
    #[error("test cancelled before completion")]
    Cancelled,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing motion source")]
    MissingMotion,
    #[error("missing stability scorer")]
    MissingScorer,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;

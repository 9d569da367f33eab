use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrigateLogError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

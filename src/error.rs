use thiserror::Error;

pub type QueryVizResult<T> = Result<T, QueryVizError>;

#[derive(Debug, Error)]
pub enum QueryVizError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

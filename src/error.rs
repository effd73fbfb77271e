use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CarouselError {
    #[error("malformed timestamp: '{0}'")]
    MalformedTimestamp(String),
    #[error("malformed block: {0}")]
    MalformedBlock(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

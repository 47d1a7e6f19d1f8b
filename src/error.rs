use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown segmenter {0}")]
    UnknownSegmenter(String),

    #[error("Invalid separator {0:?}; expected exactly one character")]
    InvalidSeparator(String),
}

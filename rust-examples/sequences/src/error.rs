use thiserror::Error;

pub type Result<T> = std::result::Result<T, SequenceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("this sequence can be consumed only once")]
    AlreadyConsumed,
}

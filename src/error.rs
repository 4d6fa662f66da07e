use thiserror::Error;

/// Errors signalled by the collections in this crate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("key not found")]
    KeyNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;

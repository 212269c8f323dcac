use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The only recoverable failure in the engine: shape parameters whose
/// derived output geometry has no cells. Everything else is a
/// precondition violation and asserts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid shape: derived output is {height}x{width}, both dimensions must be at least 1")]
    InvalidShape { height: i64, width: i64 },
}

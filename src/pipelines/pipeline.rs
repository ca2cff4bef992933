//! Pipeline trait.
use crate::error::Error;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// pipelines can hand back whatever they accumulated.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}

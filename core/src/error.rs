use thiserror::Error;

/// Message carried by [`NoValueError`].
pub const NO_VALUE_MESSAGE: &str = "Structure does not contain a value.";

/// Error returned when reading the value of a container that holds none.
#[derive(Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Error)]
#[error("Structure does not contain a value.")]
pub struct NoValueError;

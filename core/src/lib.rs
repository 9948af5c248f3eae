//! An optional value type with explicit presence, equality against raw values, and a structured serde form.

pub mod error;
pub mod maybe;
pub mod optional;
pub mod convert;

#[cfg(feature = "serde")]
mod serde_impls;

pub use error::{NoValueError, NO_VALUE_MESSAGE};
pub use maybe::{Always, MayBe, MayBeExt, Never};
pub use optional::Optional;
pub use convert::ToOptional;

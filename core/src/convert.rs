use crate::optional::Optional;

/// Wraps any value in an [`Optional`].
///
/// The result always holds a value, including when `self` is an `Option::None`. Use [`Optional::from`] to turn an
/// `Option<T>` into an `Optional<T>` instead.
pub trait ToOptional: Sized {
  fn to_optional(self) -> Optional<Self>;
}

impl<T> ToOptional for T {
  #[inline]
  fn to_optional(self) -> Optional<T> { Optional::new(self) }
}

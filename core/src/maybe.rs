use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::NoValueError;

/// A container that might hold a value of type `T`.
///
/// Implemented by [`Optional`](crate::Optional), which may or may not hold a value, [`Always`], which always holds
/// one, and [`Never`], which never does. Only [`as_option`](Self::as_option) is required; every other read is defined
/// in terms of it, so all implementations agree on presence and value.
pub trait MayBe<T> {
  /// Borrows the contained value, or returns `None` if there is no value.
  fn as_option(&self) -> Option<&T>;

  /// Returns whether a value is contained.
  #[inline]
  fn has_value(&self) -> bool { self.as_option().is_some() }

  /// Borrows the contained value, or fails with [`NoValueError`] if there is no value.
  #[inline]
  fn value(&self) -> Result<&T, NoValueError> { self.as_option().ok_or(NoValueError) }

  /// Returns a clone of the contained value, or `T::default()` if there is no value.
  #[inline]
  fn value_or_default(&self) -> T where
    T: Clone + Default
  {
    self.as_option().cloned().unwrap_or_default()
  }
}

/// Fallback reads for every [`MayBe`].
pub trait MayBeExt<T>: MayBe<T> {
  /// Returns a clone of the contained value, or `fallback` if there is no value.
  fn or(&self, fallback: T) -> T where
    T: Clone;

  /// Returns a clone of the contained value, or the result of `fallback` if there is no value. `fallback` is only
  /// called when there is no value.
  fn or_else(&self, fallback: impl FnOnce() -> T) -> T where
    T: Clone;
}

impl<T, M: MayBe<T> + ?Sized> MayBeExt<T> for M {
  #[inline]
  fn or(&self, fallback: T) -> T where
    T: Clone
  {
    match self.as_option() {
      Some(value) => value.clone(),
      None => fallback,
    }
  }

  #[inline]
  fn or_else(&self, fallback: impl FnOnce() -> T) -> T where
    T: Clone
  {
    match self.as_option() {
      Some(value) => value.clone(),
      None => fallback(),
    }
  }
}


/// A [`MayBe`] that always holds a value.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Always<T>(T);

impl<T> Always<T> {
  #[inline]
  pub const fn new(value: T) -> Self { Self(value) }

  /// Creates an [`Always`] from `option`, failing with [`NoValueError`] if it is `None`.
  #[inline]
  pub fn from_option(option: Option<T>) -> Result<Self, NoValueError> {
    option.map(Self).ok_or(NoValueError)
  }

  #[inline]
  pub fn get(&self) -> &T { &self.0 }

  #[inline]
  pub fn into_inner(self) -> T { self.0 }
}

impl<T> MayBe<T> for Always<T> {
  #[inline]
  fn as_option(&self) -> Option<&T> { Some(&self.0) }
}

impl<T: Display> Display for Always<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(&self.0, f) }
}


/// A [`MayBe`] that never holds a value.
pub struct Never<T>(PhantomData<fn() -> T>);

impl<T> Never<T> {
  #[inline]
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<T> MayBe<T> for Never<T> {
  #[inline]
  fn as_option(&self) -> Option<&T> { None }
}

// Manual impls: deriving would put bounds on `T`.
impl<T> Default for Never<T> {
  #[inline]
  fn default() -> Self { Self::new() }
}
impl<T> Clone for Never<T> {
  #[inline]
  fn clone(&self) -> Self { *self }
}
impl<T> Copy for Never<T> {}
impl<T> PartialEq for Never<T> {
  #[inline]
  fn eq(&self, _other: &Self) -> bool { true }
}
impl<T> Eq for Never<T> {}
impl<T> Hash for Never<T> {
  #[inline]
  fn hash<H: Hasher>(&self, _state: &mut H) {}
}
impl<T> Debug for Never<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str("Never") }
}
impl<T> Display for Never<T> {
  fn fmt(&self, _f: &mut Formatter<'_>) -> fmt::Result { Ok(()) }
}

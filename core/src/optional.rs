use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::error::NoValueError;
use crate::maybe::{Always, MayBe, Never};

/// Hashed in place of a value when an [`Optional`] is empty.
const EMPTY_HASH: u64 = 0x6e6f_2d76_616c_7565;

/// A value of type `T`, or nothing.
///
/// Presence is tracked by the variant, never by the nullability of `T`: `Optional::new(None::<i32>)` holds a value
/// (`None`), while `Optional::from(None::<i32>)` is empty.
///
/// Equality is defined once, in [`eq_option`](Self::eq_option): two optionals are equal when both are empty, or both
/// hold equal values. Comparing against a raw value treats `Option::None` as the null raw value, which equals an empty
/// optional. Every `==` surface in this module delegates to it, and `!=` is always its negation.
#[derive(Copy, Clone, Debug)]
pub struct Optional<T> {
  inner: Option<T>,
}

impl<T> Optional<T> {
  /// An optional without a value.
  pub const EMPTY: Self = Self { inner: None };

  #[inline]
  pub const fn empty() -> Self { Self::EMPTY }

  #[inline]
  pub const fn new(value: T) -> Self { Self { inner: Some(value) } }

  /// Creates an optional from `option`; `None` creates an empty optional.
  #[inline]
  pub const fn from_option(option: Option<T>) -> Self { Self { inner: option } }


  #[inline]
  pub const fn has_value(&self) -> bool { self.inner.is_some() }

  #[inline]
  pub const fn is_empty(&self) -> bool { self.inner.is_none() }

  /// Borrows the value, or fails with [`NoValueError`] if this optional is empty.
  #[inline]
  pub fn value(&self) -> Result<&T, NoValueError> { self.inner.as_ref().ok_or(NoValueError) }

  /// Takes the value, or fails with [`NoValueError`] if this optional is empty.
  #[inline]
  pub fn into_value(self) -> Result<T, NoValueError> { self.inner.ok_or(NoValueError) }

  /// Returns a clone of the value, or `T::default()` if this optional is empty.
  #[inline]
  pub fn value_or_default(&self) -> T where
    T: Clone + Default
  {
    self.inner.clone().unwrap_or_default()
  }

  /// Takes the value, or returns `fallback` if this optional is empty.
  #[inline]
  pub fn into_or(self, fallback: T) -> T { self.inner.unwrap_or(fallback) }

  /// Takes the value, or returns the result of `fallback` if this optional is empty. `fallback` is only called when
  /// this optional is empty.
  #[inline]
  pub fn into_or_else(self, fallback: impl FnOnce() -> T) -> T { self.inner.unwrap_or_else(fallback) }


  #[inline]
  pub fn as_option(&self) -> Option<&T> { self.inner.as_ref() }

  #[inline]
  pub fn into_option(self) -> Option<T> { self.inner }

  #[inline]
  pub fn as_ref(&self) -> Optional<&T> { Optional { inner: self.inner.as_ref() } }

  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> { Optional { inner: self.inner.map(f) } }

  /// Converts the value into `U`, keeping presence. Use this where an optional of a more general type is expected.
  #[inline]
  pub fn map_into<U>(self) -> Optional<U> where
    T: Into<U>
  {
    self.map(Into::into)
  }


  /// Compares with a raw value that may be null (`None`).
  ///
  /// Equal when this optional is empty and `other` is `None`, or when this optional holds a value equal to `other`.
  #[inline]
  pub fn eq_option(&self, other: Option<&T>) -> bool where
    T: PartialEq
  {
    match (&self.inner, other) {
      (Some(value), Some(other)) => value == other,
      (None, None) => true,
      _ => false,
    }
  }

  /// Compares with a raw value. An empty optional never equals a value.
  #[inline]
  pub fn eq_value(&self, value: &T) -> bool where
    T: PartialEq
  {
    self.eq_option(Some(value))
  }

  /// Compares with any other [`MayBe`] by presence and value.
  #[inline]
  pub fn eq_maybe<M: MayBe<T> + ?Sized>(&self, other: &M) -> bool where
    T: PartialEq
  {
    self.eq_option(other.as_option())
  }

  /// Compares with a value of unknown type.
  ///
  /// A `T` is compared as a raw value, and an `Option<T>` as a raw value that may be null. An `Optional<T>`,
  /// [`Always<T>`], or [`Never<T>`] is compared by presence and value. Anything else is unequal.
  pub fn equals_any(&self, other: &dyn Any) -> bool where
    T: PartialEq + 'static
  {
    if let Some(value) = other.downcast_ref::<T>() {
      self.eq_value(value)
    } else if let Some(option) = other.downcast_ref::<Option<T>>() {
      self.eq_option(option.as_ref())
    } else if let Some(optional) = other.downcast_ref::<Optional<T>>() {
      self.eq_maybe(optional)
    } else if let Some(always) = other.downcast_ref::<Always<T>>() {
      self.eq_maybe(always)
    } else if let Some(never) = other.downcast_ref::<Never<T>>() {
      self.eq_maybe(never)
    } else {
      false
    }
  }

  /// Hashes this optional with the standard library's default hasher, which is deterministic. Holds the hash of the
  /// value when there is one, and the same fixed hash for every empty optional. That fixed hash is the hash of the
  /// `u64` sentinel, so a present value hashing to the same bits collides with it; equality still tells them apart.
  pub fn hash_code(&self) -> u64 where
    T: Hash
  {
    let mut hasher = DefaultHasher::new();
    self.hash(&mut hasher);
    hasher.finish()
  }
}

impl<T> MayBe<T> for Optional<T> {
  #[inline]
  fn as_option(&self) -> Option<&T> { self.inner.as_ref() }
}

impl<T> Default for Optional<T> {
  #[inline]
  fn default() -> Self { Self::EMPTY }
}

impl<T> From<Option<T>> for Optional<T> {
  #[inline]
  fn from(option: Option<T>) -> Self { Self::from_option(option) }
}
impl<T> From<Optional<T>> for Option<T> {
  #[inline]
  fn from(optional: Optional<T>) -> Self { optional.inner }
}
impl<T> From<Always<T>> for Optional<T> {
  #[inline]
  fn from(always: Always<T>) -> Self { Self::new(always.into_inner()) }
}
impl<T> From<Never<T>> for Optional<T> {
  #[inline]
  fn from(_never: Never<T>) -> Self { Self::EMPTY }
}


impl<T: PartialEq> PartialEq for Optional<T> {
  #[inline]
  fn eq(&self, other: &Self) -> bool { self.eq_option(other.as_option()) }
}
impl<T: Eq> Eq for Optional<T> {}

impl<T: PartialEq> PartialEq<Option<T>> for Optional<T> {
  #[inline]
  fn eq(&self, other: &Option<T>) -> bool { self.eq_option(other.as_ref()) }
}
impl<T: PartialEq> PartialEq<Optional<T>> for Option<T> {
  #[inline]
  fn eq(&self, other: &Optional<T>) -> bool { other.eq_option(self.as_ref()) }
}

macro_rules! impl_eq_raw {
  ($($t:ty),* $(,)?) => {$(
    impl PartialEq<$t> for Optional<$t> {
      #[inline]
      fn eq(&self, other: &$t) -> bool { self.eq_value(other) }
    }
    impl PartialEq<Optional<$t>> for $t {
      #[inline]
      fn eq(&self, other: &Optional<$t>) -> bool { other.eq_value(self) }
    }
  )*};
}
impl_eq_raw!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String);

impl<'a> PartialEq<&'a str> for Optional<&'a str> {
  #[inline]
  fn eq(&self, other: &&'a str) -> bool { self.eq_value(other) }
}
impl<'a> PartialEq<Optional<&'a str>> for &'a str {
  #[inline]
  fn eq(&self, other: &Optional<&'a str>) -> bool { other.eq_value(self) }
}


impl<T: Hash> Hash for Optional<T> {
  #[inline]
  fn hash<H: Hasher>(&self, state: &mut H) {
    match &self.inner {
      Some(value) => value.hash(state),
      None => state.write_u64(EMPTY_HASH),
    }
  }
}

impl<T: Display> Display for Optional<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.inner {
      Some(value) => Display::fmt(value, f),
      None => Ok(()),
    }
  }
}


#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use crate::error::NO_VALUE_MESSAGE;

  use super::*;

  fn default_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
  }

  #[test]
  fn empty_has_no_value() {
    let empty = Optional::<i32>::empty();
    assert!(!empty.has_value());
    assert!(empty.is_empty());
    assert_eq!(empty.value(), Err(NoValueError));
    assert_eq!(empty.value().unwrap_err().to_string(), NO_VALUE_MESSAGE);
    assert_eq!(empty.value_or_default(), 0);
    assert_eq!(empty.into_value(), Err(NoValueError));
  }

  #[test]
  fn new_holds_value() {
    let optional = Optional::new(String::from("value"));
    assert!(optional.has_value());
    assert_eq!(optional.value().map(String::as_str), Ok("value"));
    assert_eq!(optional.value_or_default(), "value");
    assert_eq!(optional.into_value(), Ok(String::from("value")));
  }

  #[test]
  fn default_is_empty() {
    assert_eq!(Optional::<String>::default(), Optional::EMPTY);
    assert!(Optional::<Vec<u8>>::default().is_empty());
  }

  #[test]
  fn presence_is_independent_of_nullability() {
    let holds_none = Optional::new(None::<i32>);
    assert!(holds_none.has_value());
    assert_eq!(holds_none.value(), Ok(&None));

    let from_none = Optional::from(None::<i32>);
    assert!(!from_none.has_value());
    assert_ne!(holds_none.map(|_| 0), from_none);
  }

  #[test]
  fn owned_fallbacks() {
    assert_eq!(Optional::new(1).into_or(2), 1);
    assert_eq!(Optional::empty().into_or(2), 2);
    assert_eq!(Optional::new(1).into_or_else(|| unreachable!()), 1);
    assert_eq!(Optional::empty().into_or_else(|| 3), 3);
  }

  #[test]
  fn equality_between_optionals() {
    assert_eq!(Optional::new(1), Optional::new(1));
    assert_ne!(Optional::new(1), Optional::new(2));
    assert_eq!(Optional::<i32>::empty(), Optional::empty());
    assert_ne!(Optional::empty(), Optional::new(0));
    assert_ne!(Optional::new(0), Optional::empty());
  }

  #[test]
  fn equality_with_option_as_nullable_raw_value() {
    assert!(Optional::<i32>::empty() == None);
    assert!(None == Optional::<i32>::empty());
    assert!(Optional::new(5) == Some(5));
    assert!(Some(5) == Optional::new(5));
    assert!(Optional::new(5) != None);
    assert!(None != Optional::new(5));
    assert!(Optional::<i32>::empty() != Some(5));
  }

  #[test]
  fn equality_with_raw_primitives() {
    let number: i32 = 1337;
    assert!(Optional::new(number) == number);
    assert!(number == Optional::new(number));
    assert!(Optional::empty() != number);
    assert!(number != Optional::empty());

    let text = String::from("text");
    assert!(Optional::new(text.clone()) == text);
    assert!(Optional::new("text") == "text");
    assert!("text" != Optional::<&str>::empty());
  }

  #[test]
  fn equality_with_other_maybes() {
    let salutation = Optional::new("Hello, World!");
    assert!(salutation.eq_maybe(&Always::new("Hello, World!")));
    assert!(!salutation.eq_maybe(&Never::new()));

    let empty = Optional::<&str>::empty();
    assert!(!empty.eq_maybe(&Always::new("Hello, World!")));
    assert!(empty.eq_maybe(&Never::new()));
  }

  #[test]
  fn equals_any_dispatches_on_type() {
    let optional = Optional::new(7u8);
    assert!(optional.equals_any(&7u8));
    assert!(!optional.equals_any(&8u8));
    assert!(optional.equals_any(&Some(7u8)));
    assert!(optional.equals_any(&Optional::new(7u8)));
    assert!(optional.equals_any(&Always::new(7u8)));
    assert!(!optional.equals_any(&Never::<u8>::new()));
    assert!(!optional.equals_any(&7u16));
    assert!(!optional.equals_any(&"7"));

    let empty = Optional::<u8>::empty();
    assert!(empty.equals_any(&None::<u8>));
    assert!(empty.equals_any(&Optional::<u8>::empty()));
    assert!(empty.equals_any(&Never::<u8>::new()));
    assert!(!empty.equals_any(&0u8));
  }

  #[test]
  fn hash_of_present_is_hash_of_value() {
    assert_eq!(Optional::new(42u64).hash_code(), default_hash(&42u64));
    assert_eq!(Optional::new("a").hash_code(), Optional::new("a").hash_code());
    assert_eq!(Optional::<String>::empty().hash_code(), Optional::<String>::empty().hash_code());
  }

  #[test]
  fn empty_hash_is_sentinel_hash() {
    assert_eq!(Optional::<String>::empty().hash_code(), default_hash(&EMPTY_HASH));
    assert_eq!(Optional::<u8>::empty().hash_code(), Optional::<String>::empty().hash_code());

    let colliding = Optional::new(EMPTY_HASH);
    assert_eq!(colliding.hash_code(), Optional::<u64>::empty().hash_code());
    assert_ne!(colliding, Optional::empty());
  }

  #[test]
  fn usable_as_hash_set_key() {
    let set: HashSet<Optional<i32>> = [Optional::new(1), Optional::new(1), Optional::empty(), Optional::empty()]
      .into_iter()
      .collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&Optional::empty()));
  }

  #[test]
  fn display() {
    assert_eq!(Optional::new("Hello, World!").to_string(), "Hello, World!");
    assert_eq!(Optional::new(12.5).to_string(), "12.5");
    assert_eq!(Optional::<i32>::empty().to_string(), "");
  }

  #[test]
  fn map_into_keeps_presence() {
    let derived = Optional::new("Hello, World!");
    let general: Optional<String> = derived.map_into();
    assert_eq!(general.to_string(), derived.to_string());
    assert!(Optional::<&str>::empty().map_into::<String>().is_empty());
  }

  #[test]
  fn conversions() {
    let option: Option<i32> = Optional::new(1).into();
    assert_eq!(option, Some(1));
    assert_eq!(Optional::<i32>::empty().into_option(), None);
    assert_eq!(Optional::from(Always::new(1)), Optional::new(1));
    assert_eq!(Optional::from(Never::<i32>::new()), Optional::empty());
    assert_eq!(Optional::new(1).as_ref().map(|v| v + 1), Optional::new(2));
  }
}

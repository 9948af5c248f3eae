use std::fmt::{self, Formatter};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeStruct;

use crate::optional::Optional;

const NAME: &str = "Optional";
const HAS_VALUE: &str = "hasValue";
const VALUE: &str = "value";
const FIELDS: &[&str] = &[HAS_VALUE, VALUE];

/// Serialized as a struct with a `hasValue` flag, followed by a `value` field only when there is a value.
impl<T: Serialize> Serialize for Optional<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self.as_option() {
      Some(value) => {
        let mut state = serializer.serialize_struct(NAME, 2)?;
        state.serialize_field(HAS_VALUE, &true)?;
        state.serialize_field(VALUE, value)?;
        state.end()
      }
      None => {
        let mut state = serializer.serialize_struct(NAME, 1)?;
        state.serialize_field(HAS_VALUE, &false)?;
        state.skip_field(VALUE)?;
        state.end()
      }
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_struct(NAME, FIELDS, OptionalVisitor(PhantomData))
  }
}


enum Field {
  HasValue,
  Value,
  Ignore,
}

impl<'de> Deserialize<'de> for Field {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_identifier(FieldVisitor)
  }
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
  type Value = Field;

  fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str("field identifier")
  }

  fn visit_u64<E: de::Error>(self, index: u64) -> Result<Field, E> {
    let field = match index {
      0 => Field::HasValue,
      1 => Field::Value,
      _ => Field::Ignore,
    };
    Ok(field)
  }

  fn visit_str<E: de::Error>(self, name: &str) -> Result<Field, E> {
    let field = match name {
      HAS_VALUE => Field::HasValue,
      VALUE => Field::Value,
      _ => Field::Ignore,
    };
    Ok(field)
  }

  fn visit_bytes<E: de::Error>(self, name: &[u8]) -> Result<Field, E> {
    let field = match name {
      b"hasValue" => Field::HasValue,
      b"value" => Field::Value,
      _ => Field::Ignore,
    };
    Ok(field)
  }
}


struct OptionalVisitor<T>(PhantomData<fn() -> T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OptionalVisitor<T> {
  type Value = Optional<T>;

  fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str("struct Optional")
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Optional<T>, A::Error> {
    let Some(has_value) = seq.next_element::<bool>()? else {
      return Err(de::Error::invalid_length(0, &self));
    };
    if !has_value {
      return Ok(Optional::empty());
    }
    match seq.next_element()? {
      Some(value) => Ok(Optional::new(value)),
      None => {
        tracing::trace!("rejecting optional: `{}` is set but `{}` is missing", HAS_VALUE, VALUE);
        Err(de::Error::invalid_length(1, &self))
      }
    }
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Optional<T>, A::Error> {
    let mut has_value: Option<bool> = None;
    let mut value: Option<T> = None;
    while let Some(key) = map.next_key()? {
      match key {
        Field::HasValue => {
          if has_value.is_some() {
            return Err(de::Error::duplicate_field(HAS_VALUE));
          }
          has_value = Some(map.next_value()?);
        }
        Field::Value => {
          if value.is_some() {
            return Err(de::Error::duplicate_field(VALUE));
          }
          value = Some(map.next_value()?);
        }
        Field::Ignore => {
          map.next_value::<IgnoredAny>()?;
        }
      }
    }

    let Some(has_value) = has_value else {
      return Err(de::Error::missing_field(HAS_VALUE));
    };
    match (has_value, value) {
      (true, Some(value)) => Ok(Optional::new(value)),
      (true, None) => {
        tracing::trace!("rejecting optional: `{}` is set but `{}` is missing", HAS_VALUE, VALUE);
        Err(de::Error::missing_field(VALUE))
      }
      (false, Some(_)) => {
        tracing::trace!("discarding `{}` of optional: `{}` is not set", VALUE, HAS_VALUE);
        Ok(Optional::empty())
      }
      (false, None) => Ok(Optional::empty()),
    }
  }
}

//! Two-pass decoding for discriminated unions.
//!
//! Many Bot API objects share one wire shape and carry a string field
//! (`type`, `status`, `source`) naming the variant they hold. Decoding reads
//! the same bytes twice: a streaming visitor first pulls out only the
//! discriminator, skipping every other value without building a tree, then
//! the bytes are decoded in full into the variant the discriminator selects.
//!
//! Unions nested inside derived structs capture their raw JSON span with
//! [`RawValue`], so the two passes also work several levels deep. This needs
//! a `serde_json` deserializer reading from a string or a byte slice.

use serde::de::{self, DeserializeOwned, DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// A closed set of wire variants selected by a string discriminator.
///
/// The registry is the `match` inside [`TaggedUnion::decode_variant`]: one
/// arm per discriminator value, checked by the compiler against the enum.
pub trait TaggedUnion: Sized {
    /// Union name used in error messages.
    const NAME: &'static str;

    /// Wire name of the discriminator field.
    const TAG_FIELD: &'static str;

    /// Every discriminator value this union accepts.
    const TAGS: &'static [&'static str];

    /// Discriminator value of the populated variant.
    fn tag(&self) -> &'static str;

    /// Decode `raw` in full as the variant registered for `tag`.
    ///
    /// Must fail with [`unknown_tag`] for values outside [`Self::TAGS`].
    fn decode_variant(tag: &str, raw: &[u8]) -> Result<Self, serde_json::Error>;

    /// Encode the populated variant's payload without the discriminator.
    fn encode_variant(&self) -> Result<Map<String, Value>, serde_json::Error>;
}

/// Decode a tagged object from raw JSON bytes.
pub fn decode<U: TaggedUnion>(raw: &[u8]) -> Result<U, serde_json::Error> {
    let tag = match peek_field::<String>(raw, U::TAG_FIELD)? {
        Some(tag) if !tag.is_empty() => tag,
        Some(_) => {
            return Err(de::Error::custom(format!(
                "{}: empty `{}` discriminator",
                U::NAME,
                U::TAG_FIELD
            )))
        }
        None => return Err(de::Error::missing_field(U::TAG_FIELD)),
    };
    U::decode_variant(&tag, raw)
}

/// Encode a tagged object: the variant payload plus its discriminator.
pub fn encode<U: TaggedUnion>(union: &U) -> Result<Map<String, Value>, serde_json::Error> {
    let mut object = union.encode_variant()?;
    object.insert(
        U::TAG_FIELD.to_owned(),
        Value::String(union.tag().to_owned()),
    );
    Ok(object)
}

/// Error for a discriminator value the union does not register.
pub fn unknown_tag<U: TaggedUnion>(tag: &str) -> serde_json::Error {
    de::Error::unknown_variant(tag, U::TAGS)
}

/// Second-pass helper: decode `raw` as `T` and wrap it into the union.
pub fn variant<T, U>(raw: &[u8], wrap: fn(T) -> U) -> Result<U, serde_json::Error>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(raw).map(wrap)
}

/// Encode a variant payload, which must be a JSON object.
pub fn payload<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(object) => Ok(object),
        other => Err(ser::Error::custom(format!(
            "variant payload must encode as an object, got {other}"
        ))),
    }
}

/// Read a single top-level field of a JSON object without decoding the rest.
///
/// Returns `Ok(None)` when the field is absent. The first occurrence wins if
/// the key repeats. Fails when `raw` is not an object or the field value does
/// not decode as `T`.
pub fn peek_field<T: DeserializeOwned>(
    raw: &[u8],
    field: &str,
) -> Result<Option<T>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(raw);
    let found = FieldPeek {
        field,
        marker: PhantomData,
    }
    .deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(found)
}

/// `Serialize` body shared by every [`TaggedUnion`].
pub fn serialize<U, S>(union: &U, serializer: S) -> Result<S::Ok, S::Error>
where
    U: TaggedUnion,
    S: Serializer,
{
    encode(union)
        .map_err(<S::Error as ser::Error>::custom)?
        .serialize(serializer)
}

/// `Deserialize` body shared by every [`TaggedUnion`].
pub fn deserialize<'de, U, D>(deserializer: D) -> Result<U, D::Error>
where
    U: TaggedUnion,
    D: Deserializer<'de>,
{
    let raw = <Box<RawValue>>::deserialize(deserializer)?;
    decode(raw.get().as_bytes()).map_err(<D::Error as de::Error>::custom)
}

/// Wire up `Serialize` and `Deserialize` for [`TaggedUnion`] types.
#[macro_export]
macro_rules! tagged_serde {
    ($($union:ty),+ $(,)?) => {$(
        impl ::serde::Serialize for $union {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::tagged::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $union {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::tagged::deserialize(deserializer)
            }
        }
    )+};
}

struct FieldPeek<'f, T> {
    field: &'f str,
    marker: PhantomData<T>,
}

impl<'de, T: DeserializeOwned> DeserializeSeed<'de> for FieldPeek<'_, T> {
    type Value = Option<T>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de, T: DeserializeOwned> Visitor<'de> for FieldPeek<'_, T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object with a `{}` field", self.field)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut found = None;
        // serde_json rejects a map that is not read to the end.
        while let Some(matched) = map.next_key_seed(KeyMatch(self.field))? {
            if matched && found.is_none() {
                found = Some(map.next_value::<T>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(found)
    }
}

/// Compares an object key against the wanted name without allocating it.
struct KeyMatch<'f>(&'f str);

impl<'de> DeserializeSeed<'de> for KeyMatch<'_> {
    type Value = bool;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for KeyMatch<'_> {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a field name")
    }

    fn visit_str<E: de::Error>(self, key: &str) -> Result<bool, E> {
        Ok(key == self.0)
    }
}

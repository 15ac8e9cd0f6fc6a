use std::borrow::Cow;

use crate::tag::Tag;
use crate::{Compound, Error, List, Result};

/// Represents an arbitrary NBT value.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// Represents a reference to an arbitrary NBT value, where the tag is not part
/// of the reference.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ValueRef<'a> {
    Byte(&'a i8),
    Short(&'a i16),
    Int(&'a i32),
    Long(&'a i64),
    Float(&'a f32),
    Double(&'a f64),
    ByteArray(&'a [i8]),
    String(&'a str),
    List(&'a List),
    Compound(&'a Compound),
    IntArray(&'a [i32]),
    LongArray(&'a [i64]),
}

macro_rules! impl_value {
    ($name:ident, $($lifetime:lifetime)?, $($reference:tt)*) => {
        impl $(<$lifetime>)? $name $(<$lifetime>)? {
            /// Returns the type of this value.
            pub fn tag(&self) -> Tag {
                match self {
                    Self::Byte(_) => Tag::Byte,
                    Self::Short(_) => Tag::Short,
                    Self::Int(_) => Tag::Int,
                    Self::Long(_) => Tag::Long,
                    Self::Float(_) => Tag::Float,
                    Self::Double(_) => Tag::Double,
                    Self::ByteArray(_) => Tag::ByteArray,
                    Self::String(_) => Tag::String,
                    Self::List(_) => Tag::List,
                    Self::Compound(_) => Tag::Compound,
                    Self::IntArray(_) => Tag::IntArray,
                    Self::LongArray(_) => Tag::LongArray,
                }
            }
        }

        impl $(<$lifetime>)? From<$($reference)* i8> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* i8) -> Self {
                Self::Byte(v)
            }
        }

        impl $(<$lifetime>)? From<$($reference)* i16> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* i16) -> Self {
                Self::Short(v)
            }
        }

        impl $(<$lifetime>)? From<$($reference)* i32> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* i32) -> Self {
                Self::Int(v)
            }
        }

        impl $(<$lifetime>)? From<$($reference)* i64> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* i64) -> Self {
                Self::Long(v)
            }
        }

        impl $(<$lifetime>)? From<$($reference)* f32> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* f32) -> Self {
                Self::Float(v)
            }
        }

        impl $(<$lifetime>)? From<$($reference)* f64> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* f64) -> Self {
                Self::Double(v)
            }
        }

        impl $(<$lifetime>)? From<$($reference)* List> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* List) -> Self {
                Self::List(v)
            }
        }

        impl $(<$lifetime>)? From<$($reference)* Compound> for $name $(<$lifetime>)? {
            fn from(v: $($reference)* Compound) -> Self {
                Self::Compound(v)
            }
        }
    }
}

impl_value!(Value,,);
impl_value!(ValueRef, 'a, &'a);

macro_rules! accessors {
    ($($variant:ident($ty:ty): $as_ref:ident, $as_mut:ident, $into:ident;)*) => {
        impl Value {
            $(
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        Self::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Self::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                pub fn $into(self) -> Option<$ty> {
                    match self {
                        Self::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            )*
        }
    };
}

accessors! {
    Byte(i8): as_byte, as_byte_mut, into_byte;
    Short(i16): as_short, as_short_mut, into_short;
    Int(i32): as_int, as_int_mut, into_int;
    Long(i64): as_long, as_long_mut, into_long;
    Float(f32): as_float, as_float_mut, into_float;
    Double(f64): as_double, as_double_mut, into_double;
    ByteArray(Vec<i8>): as_byte_array, as_byte_array_mut, into_byte_array;
    String(String): as_string, as_string_mut, into_string;
    List(List): as_list, as_list_mut, into_list;
    Compound(Compound): as_compound, as_compound_mut, into_compound;
    IntArray(Vec<i32>): as_int_array, as_int_array_mut, into_int_array;
    LongArray(Vec<i64>): as_long_array, as_long_array_mut, into_long_array;
}

impl Value {
    /// Creates a bounded integer value of kind `tag`.
    ///
    /// Fails with [`Error::Range`] when `value` does not fit the kind, and with
    /// [`Error::Type`] when `tag` is not one of `Byte`, `Short`, `Int` or
    /// `Long`.
    ///
    /// ```
    /// use nbt_codec::{Error, Tag, Value};
    ///
    /// assert_eq!(Value::from_integer(Tag::Short, 32767).unwrap(), Value::Short(32767));
    /// assert!(matches!(Value::from_integer(Tag::Short, 32768), Err(Error::Range { .. })));
    /// ```
    pub fn from_integer(tag: Tag, value: i64) -> Result<Self> {
        let out_of_range = || Error::range(tag, value);

        Ok(match tag {
            Tag::Byte => Value::Byte(value.try_into().map_err(|_| out_of_range())?),
            Tag::Short => Value::Short(value.try_into().map_err(|_| out_of_range())?),
            Tag::Int => Value::Int(value.try_into().map_err(|_| out_of_range())?),
            Tag::Long => Value::Long(value),
            _ => {
                return Err(Error::type_error(format!(
                    "{tag} is not a bounded integer type"
                )))
            }
        })
    }

    /// Assigns a new value to a bounded integer scalar, keeping its kind.
    pub fn set_integer(&mut self, value: i64) -> Result<()> {
        *self = Value::from_integer(self.tag(), value)?;
        Ok(())
    }

    /// Assigns a boolean to a byte scalar (`true` is `1`, `false` is `0`).
    pub fn set_bool(&mut self, value: bool) -> Result<()> {
        match self {
            Value::Byte(b) => {
                *b = value.into();
                Ok(())
            }
            other => Err(Error::kind_mismatch(Tag::Byte, other.tag())),
        }
    }

    /// Returns a borrowed view of this value.
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Byte(v) => ValueRef::Byte(v),
            Value::Short(v) => ValueRef::Short(v),
            Value::Int(v) => ValueRef::Int(v),
            Value::Long(v) => ValueRef::Long(v),
            Value::Float(v) => ValueRef::Float(v),
            Value::Double(v) => ValueRef::Double(v),
            Value::ByteArray(v) => ValueRef::ByteArray(v),
            Value::String(v) => ValueRef::String(v),
            Value::List(v) => ValueRef::List(v),
            Value::Compound(v) => ValueRef::Compound(v),
            Value::IntArray(v) => ValueRef::IntArray(v),
            Value::LongArray(v) => ValueRef::LongArray(v),
        }
    }
}

impl ValueRef<'_> {
    /// Clones the referenced data into an owned [`Value`].
    pub fn to_value(self) -> Value {
        match self {
            ValueRef::Byte(v) => Value::Byte(*v),
            ValueRef::Short(v) => Value::Short(*v),
            ValueRef::Int(v) => Value::Int(*v),
            ValueRef::Long(v) => Value::Long(*v),
            ValueRef::Float(v) => Value::Float(*v),
            ValueRef::Double(v) => Value::Double(*v),
            ValueRef::ByteArray(v) => Value::ByteArray(v.to_vec()),
            ValueRef::String(v) => Value::String(v.to_owned()),
            ValueRef::List(v) => Value::List(v.clone()),
            ValueRef::Compound(v) => Value::Compound(v.clone()),
            ValueRef::IntArray(v) => Value::IntArray(v.to_vec()),
            ValueRef::LongArray(v) => Value::LongArray(v.to_vec()),
        }
    }
}

/// Bools are usually represented as `0` or `1` bytes in NBT.
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Byte(b.into())
    }
}

impl From<Vec<i8>> for Value {
    fn from(v: Vec<i8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &'a str) -> Self {
        Self::String(v.to_owned())
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(v: Cow<'a, str>) -> Self {
        Self::String(v.into_owned())
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Self::LongArray(v)
    }
}

impl<'a> From<&'a [i8]> for ValueRef<'a> {
    fn from(v: &'a [i8]) -> Self {
        Self::ByteArray(v)
    }
}

impl<'a> From<&'a str> for ValueRef<'a> {
    fn from(v: &'a str) -> ValueRef<'a> {
        Self::String(v)
    }
}

impl<'a> From<&'a [i32]> for ValueRef<'a> {
    fn from(v: &'a [i32]) -> Self {
        Self::IntArray(v)
    }
}

impl<'a> From<&'a [i64]> for ValueRef<'a> {
    fn from(v: &'a [i64]) -> Self {
        Self::LongArray(v)
    }
}

/// The root of an NBT document: a value together with its name.
///
/// Only the root carries a name of its own. Compound entries are named by
/// their key and list elements are never named. An empty `name` stands for an
/// unnamed root, which is also how the binary format writes it.
#[derive(Clone, PartialEq, Debug)]
pub struct NamedTag {
    pub name: String,
    pub value: Value,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a root with no name.
    pub fn unnamed(value: impl Into<Value>) -> Self {
        Self::new(String::new(), value)
    }

    /// Returns the root name, or `None` if the root is unnamed.
    pub fn name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    pub fn tag(&self) -> Tag {
        self.value.tag()
    }
}

impl From<Compound> for NamedTag {
    fn from(c: Compound) -> Self {
        Self::unnamed(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_range_boundary() {
        assert_eq!(
            Value::from_integer(Tag::Short, 32767).unwrap(),
            Value::Short(i16::MAX)
        );
        assert!(matches!(
            Value::from_integer(Tag::Short, 32768),
            Err(Error::Range {
                tag: Tag::Short,
                value: 32768,
                ..
            })
        ));
        assert!(Value::from_integer(Tag::Short, -32768).is_ok());
        assert!(Value::from_integer(Tag::Short, -32769).is_err());
    }

    #[test]
    fn byte_and_int_ranges() {
        assert!(Value::from_integer(Tag::Byte, 127).is_ok());
        assert!(Value::from_integer(Tag::Byte, 128).is_err());
        assert!(Value::from_integer(Tag::Byte, -129).is_err());
        assert!(Value::from_integer(Tag::Int, i64::from(i32::MIN)).is_ok());
        assert!(Value::from_integer(Tag::Int, i64::from(i32::MAX) + 1).is_err());
        assert_eq!(
            Value::from_integer(Tag::Long, i64::MIN).unwrap(),
            Value::Long(i64::MIN)
        );
    }

    #[test]
    fn non_integer_kind_is_type_error() {
        assert!(matches!(
            Value::from_integer(Tag::Float, 1),
            Err(Error::Type(_))
        ));
        assert!(matches!(
            Value::from_integer(Tag::End, 1),
            Err(Error::Type(_))
        ));
    }

    #[test]
    fn set_integer_keeps_kind() {
        let mut v = Value::Byte(0);
        v.set_integer(-128).unwrap();
        assert_eq!(v, Value::Byte(-128));

        assert!(v.set_integer(200).is_err());
        // A failed assignment leaves the old value in place.
        assert_eq!(v, Value::Byte(-128));

        let mut s = Value::String("x".into());
        assert!(matches!(s.set_integer(1), Err(Error::Type(_))));
    }

    #[test]
    fn bools_are_bytes() {
        assert_eq!(Value::from(true), Value::Byte(1));
        assert_eq!(Value::from(false), Value::Byte(0));

        let mut v = Value::Byte(5);
        v.set_bool(false).unwrap();
        assert_eq!(v, Value::Byte(0));
        assert!(Value::Int(0).set_bool(true).is_err());
    }

    #[test]
    fn root_name() {
        assert_eq!(NamedTag::unnamed(1).name(), None);
        assert_eq!(NamedTag::new("hello", 1).name(), Some("hello"));
    }
}

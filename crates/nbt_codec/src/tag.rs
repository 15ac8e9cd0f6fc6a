use std::fmt;
use std::fmt::Formatter;

use crate::{Error, Result};

/// One of the possible NBT data types.
///
/// The discriminant of each variant is the one byte kind id used by the
/// binary format.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum Tag {
    // Variant order is significant!
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

impl Tag {
    /// Converts a kind id into a [`Tag`], failing with [`Error::Format`] when
    /// the id is outside `0x00..=0x0C`.
    pub fn from_u8(id: u8) -> Result<Self> {
        Ok(match id {
            0 => Tag::End,
            1 => Tag::Byte,
            2 => Tag::Short,
            3 => Tag::Int,
            4 => Tag::Long,
            5 => Tag::Float,
            6 => Tag::Double,
            7 => Tag::ByteArray,
            8 => Tag::String,
            9 => Tag::List,
            10 => Tag::Compound,
            11 => Tag::IntArray,
            12 => Tag::LongArray,
            _ => return Err(Error::format(format!("invalid tag id {id:#04x}"))),
        })
    }

    /// The kind id written to the binary format.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns the name of this tag for error reporting purposes.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::End => "end",
            Tag::Byte => "byte",
            Tag::Short => "short",
            Tag::Int => "int",
            Tag::Long => "long",
            Tag::Float => "float",
            Tag::Double => "double",
            Tag::ByteArray => "byte array",
            Tag::String => "string",
            Tag::List => "list",
            Tag::Compound => "compound",
            Tag::IntArray => "int array",
            Tag::LongArray => "long array",
        }
    }

    /// The inclusive range of values representable by a bounded integer kind,
    /// or `None` for every other kind.
    pub const fn integer_range(self) -> Option<(i64, i64)> {
        match self {
            Tag::Byte => Some((i8::MIN as i64, i8::MAX as i64)),
            Tag::Short => Some((i16::MIN as i64, i16::MAX as i64)),
            Tag::Int => Some((i32::MIN as i64, i32::MAX as i64)),
            Tag::Long => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        Tag::from_u8(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for id in 0..=12_u8 {
            assert_eq!(Tag::from_u8(id).unwrap().id(), id);
        }
    }

    #[test]
    fn rejects_unknown_id() {
        assert!(matches!(Tag::from_u8(13), Err(Error::Format(_))));
        assert!(matches!(Tag::from_u8(0xff), Err(Error::Format(_))));
    }
}

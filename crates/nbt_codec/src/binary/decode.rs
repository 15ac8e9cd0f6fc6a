use std::fmt;
use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};
use tracing::{trace, warn};

use super::{Error, Result};
use crate::tag::Tag;
use crate::{Compound, List, NamedTag, Value, MAX_DEPTH};

/// Upper bound on speculative preallocation, so a corrupt length prefix cannot
/// trigger a huge allocation before any element has been read.
const MAX_PREALLOC: usize = 4096;

/// Decodes uncompressed NBT binary data from the provided reader.
///
/// The root may be of any type except `TAG_End`. Every fixed-size field must
/// be present in full; running out of input is reported as
/// [`Error::Format`].
pub fn from_binary<R: Read>(reader: R) -> Result<NamedTag> {
    let mut state = DecodeState {
        reader,
        pos: 0,
        depth: 0,
    };

    let tag = state.read_tag()?;

    if tag == Tag::End {
        return Err(state.error("root tag cannot be TAG_End"));
    }

    let name = state.read_string()?;
    let value = state.read_payload(tag)?;

    trace!(%tag, name = name.as_str(), bytes = state.pos, "decoded NBT root");

    Ok(NamedTag { name, value })
}

/// Decodes NBT from a byte slice, advancing the slice past the decoded data.
pub fn from_binary_slice(slice: &mut &[u8]) -> Result<NamedTag> {
    from_binary(slice)
}

impl NamedTag {
    /// See [`from_binary`].
    pub fn from_binary<R: Read>(reader: R) -> Result<Self> {
        from_binary(reader)
    }
}

struct DecodeState<R> {
    reader: R,
    /// Number of bytes consumed so far, for error reporting.
    pos: u64,
    depth: usize,
}

macro_rules! read_fixed {
    ($($name:ident => $ty:ty, $read:ident $(::<$order:ty>)?;)*) => {
        $(
            fn $name(&mut self) -> Result<$ty> {
                let v = self
                    .reader
                    .$read$(::<$order>)?()
                    .map_err(|e| self.io_error(e))?;
                self.pos += std::mem::size_of::<$ty>() as u64;
                Ok(v)
            }
        )*
    };
}

impl<R: Read> DecodeState<R> {
    read_fixed! {
        read_u8 => u8, read_u8;
        read_byte => i8, read_i8;
        read_short => i16, read_i16::<BigEndian>;
        read_int => i32, read_i32::<BigEndian>;
        read_long => i64, read_i64::<BigEndian>;
        read_float => f32, read_f32::<BigEndian>;
        read_double => f64, read_f64::<BigEndian>;
        read_u16 => u16, read_u16::<BigEndian>;
    }

    fn error<M: fmt::Display>(&self, msg: M) -> Error {
        Error::format(format!("{msg} (at byte {})", self.pos))
    }

    fn io_error(&self, e: io::Error) -> Error {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            self.error("unexpected end of input")
        } else {
            Error::Io(e)
        }
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let id = self.read_u8()?;
        Tag::from_u8(id).map_err(|_| self.error(format_args!("invalid tag id {id:#04x}")))
    }

    /// Reads a signed 32-bit element count, rejecting negative values.
    fn read_len(&mut self, what: &str) -> Result<usize> {
        let len = self.read_int()?;

        match usize::try_from(len) {
            Ok(len) => Ok(len),
            Err(_) => Err(self.error(format_args!("{what} with negative length {len}"))),
        }
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        let res = (&mut self.reader).take(len as u64).read_to_end(&mut buf);
        let read = res.map_err(|e| self.io_error(e))?;
        self.pos += read as u64;

        if read != len {
            return Err(self.error("unexpected end of input"));
        }

        Ok(buf)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()?;
        let bytes = self.read_bytes(len.into())?;

        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                let bytes = e.into_bytes();
                match cesu8::from_java_cesu8(&bytes) {
                    Ok(s) => s.into_owned(),
                    Err(_) => {
                        warn!(
                            pos = self.pos,
                            "string is not valid UTF-8, replacing invalid sequences"
                        );
                        String::from_utf8_lossy(&bytes).into_owned()
                    }
                }
            }
        })
    }

    fn read_payload(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::End => return Err(self.error("unexpected TAG_End payload")),
            Tag::Byte => Value::Byte(self.read_byte()?),
            Tag::Short => Value::Short(self.read_short()?),
            Tag::Int => Value::Int(self.read_int()?),
            Tag::Long => Value::Long(self.read_long()?),
            Tag::Float => Value::Float(self.read_float()?),
            Tag::Double => Value::Double(self.read_double()?),
            Tag::ByteArray => Value::ByteArray(self.read_byte_array()?),
            Tag::String => Value::String(self.read_string()?),
            Tag::List => Value::List(self.read_any_list()?),
            Tag::Compound => Value::Compound(self.read_compound()?),
            Tag::IntArray => Value::IntArray(self.read_int_array()?),
            Tag::LongArray => Value::LongArray(self.read_long_array()?),
        })
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_len("byte array")?;
        Ok(u8_vec_into_i8_vec(self.read_bytes(len)?))
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_len("int array")?;
        self.read_elems(len, Self::read_int)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_len("long array")?;
        self.read_elems(len, Self::read_long)
    }

    fn read_elems<T, F>(&mut self, len: usize, mut read_elem: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let mut elems = Vec::with_capacity(len.min(MAX_PREALLOC));

        for _ in 0..len {
            elems.push(read_elem(self)?);
        }

        Ok(elems)
    }

    fn read_any_list(&mut self) -> Result<List> {
        self.enter()?;

        let elem_type = self.read_tag()?;
        let len = self.read_len("list")?;

        let list = match elem_type {
            Tag::End => {
                if len != 0 {
                    return Err(self.error(format_args!(
                        "list with TAG_End element type must have length zero, found {len}"
                    )));
                }
                List::End
            }
            Tag::Byte => List::Byte(u8_vec_into_i8_vec(self.read_bytes(len)?)),
            Tag::Short => List::Short(self.read_elems(len, Self::read_short)?),
            Tag::Int => List::Int(self.read_elems(len, Self::read_int)?),
            Tag::Long => List::Long(self.read_elems(len, Self::read_long)?),
            Tag::Float => List::Float(self.read_elems(len, Self::read_float)?),
            Tag::Double => List::Double(self.read_elems(len, Self::read_double)?),
            Tag::ByteArray => List::ByteArray(self.read_elems(len, Self::read_byte_array)?),
            Tag::String => List::String(self.read_elems(len, Self::read_string)?),
            Tag::List => List::List(self.read_elems(len, Self::read_any_list)?),
            Tag::Compound => List::Compound(self.read_elems(len, Self::read_compound)?),
            Tag::IntArray => List::IntArray(self.read_elems(len, Self::read_int_array)?),
            Tag::LongArray => List::LongArray(self.read_elems(len, Self::read_long_array)?),
        };

        self.depth -= 1;
        Ok(list)
    }

    fn read_compound(&mut self) -> Result<Compound> {
        self.enter()?;

        let mut compound = Compound::new();

        loop {
            let tag = self.read_tag()?;

            if tag == Tag::End {
                break;
            }

            let name = self.read_string()?;
            let value = self.read_payload(tag)?;

            compound.push_entry(name, value);
        }

        self.depth -= 1;
        Ok(compound)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format_args!(
                "nesting exceeds maximum depth of {MAX_DEPTH}"
            )));
        }

        self.depth += 1;
        Ok(())
    }
}

fn u8_vec_into_i8_vec(vec: Vec<u8>) -> Vec<i8> {
    vec.into_iter().map(|b| b as i8).collect()
}

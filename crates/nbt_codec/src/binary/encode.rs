use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

use super::{Error, Result};
use crate::tag::Tag;
use crate::{Compound, List, NamedTag, Value, MAX_DEPTH};

/// Encodes uncompressed NBT binary data to the provided writer, returning the
/// number of bytes written.
///
/// Any value may be used as the root. The root name is written as-is; an
/// empty name is the conventional choice.
pub fn to_binary<W: Write>(tag: &NamedTag, writer: W) -> Result<usize> {
    let mut state = EncodeState {
        writer: CountingWriter::new(writer),
        depth: 0,
    };

    state.write_named(&tag.name, &tag.value)?;

    Ok(state.writer.written)
}

/// Returns the number of bytes that will be written when [`to_binary`] is
/// called with this root.
///
/// If `to_binary` results in `Ok`, the exact number of bytes reported by this
/// function will have been written. If the result is `Err`, the count is that
/// of the bytes written before the failing value.
pub fn written_size(tag: &NamedTag) -> usize {
    let mut state = EncodeState {
        writer: CountingWriter::new(io::sink()),
        depth: 0,
    };

    // Writing to a sink only fails where `to_binary` would.
    let _ = state.write_named(&tag.name, &tag.value);

    state.writer.written
}

impl NamedTag {
    /// See [`to_binary`].
    pub fn to_binary<W: Write>(&self, writer: W) -> Result<usize> {
        to_binary(self, writer)
    }

    /// See [`written_size`].
    pub fn written_size(&self) -> usize {
        written_size(self)
    }
}

/// Passes writes through to `inner`, counting the bytes accepted.
pub(crate) struct CountingWriter<W> {
    inner: W,
    pub(crate) written: usize,
}

impl<W> CountingWriter<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct EncodeState<W> {
    writer: W,
    depth: usize,
}

impl<W: Write> EncodeState<W> {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        Ok(self.writer.write_u8(tag.id())?)
    }

    /// Writes a full tag: kind id, name and payload. Used for the root and for
    /// compound entries.
    fn write_named(&mut self, name: &str, v: &Value) -> Result<()> {
        self.write_tag(v.tag())?;
        self.write_string(name)?;
        self.write_payload(v)
    }

    /// Writes only the payload of a value, as list elements are written.
    fn write_payload(&mut self, v: &Value) -> Result<()> {
        match v {
            Value::Byte(b) => Ok(self.writer.write_i8(*b)?),
            Value::Short(s) => Ok(self.writer.write_i16::<BigEndian>(*s)?),
            Value::Int(i) => self.write_int(*i),
            Value::Long(l) => Ok(self.writer.write_i64::<BigEndian>(*l)?),
            Value::Float(f) => Ok(self.writer.write_f32::<BigEndian>(*f)?),
            Value::Double(d) => Ok(self.writer.write_f64::<BigEndian>(*d)?),
            Value::ByteArray(ba) => self.write_byte_array(ba),
            Value::String(s) => self.write_string(s),
            Value::List(l) => self.write_any_list(l),
            Value::Compound(c) => self.write_compound(c),
            Value::IntArray(ia) => self.write_int_array(ia),
            Value::LongArray(la) => self.write_long_array(la),
        }
    }

    fn write_int(&mut self, int: i32) -> Result<()> {
        Ok(self.writer.write_i32::<BigEndian>(int)?)
    }

    fn write_len(&mut self, len: usize, what: &str) -> Result<()> {
        match len.try_into() {
            Ok(len) => self.write_int(len),
            Err(_) => Err(Error::format(format!(
                "{what} of length {len} exceeds maximum of i32::MAX"
            ))),
        }
    }

    fn write_byte_array(&mut self, bytes: &[i8]) -> Result<()> {
        self.write_len(bytes.len(), "byte array")?;

        Ok(self.writer.write_all(i8_slice_as_u8_slice(bytes))?)
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let len = s.len();

        match len.try_into() {
            Ok(n) => self.writer.write_u16::<BigEndian>(n)?,
            Err(_) => {
                return Err(Error::format(format!(
                    "string of length {len} exceeds maximum of u16::MAX"
                )))
            }
        }

        Ok(self.writer.write_all(s.as_bytes())?)
    }

    fn write_any_list(&mut self, list: &List) -> Result<()> {
        self.enter()?;

        let res = match list {
            List::End => {
                self.write_tag(Tag::End)?;
                // Length
                self.write_int(0)
            }
            List::Byte(bl) => {
                self.write_tag(Tag::Byte)?;
                self.write_len(bl.len(), "byte list")?;

                Ok(self.writer.write_all(i8_slice_as_u8_slice(bl))?)
            }
            List::Short(sl) => self.write_list(sl, Tag::Short, |st, s| {
                Ok(st.writer.write_i16::<BigEndian>(*s)?)
            }),
            List::Int(il) => self.write_list(il, Tag::Int, |st, i| st.write_int(*i)),
            List::Long(ll) => self.write_list(ll, Tag::Long, |st, l| {
                Ok(st.writer.write_i64::<BigEndian>(*l)?)
            }),
            List::Float(fl) => self.write_list(fl, Tag::Float, |st, f| {
                Ok(st.writer.write_f32::<BigEndian>(*f)?)
            }),
            List::Double(dl) => self.write_list(dl, Tag::Double, |st, d| {
                Ok(st.writer.write_f64::<BigEndian>(*d)?)
            }),
            List::ByteArray(bal) => {
                self.write_list(bal, Tag::ByteArray, |st, ba| st.write_byte_array(ba))
            }
            List::String(sl) => self.write_list(sl, Tag::String, |st, s| st.write_string(s)),
            List::List(ll) => self.write_list(ll, Tag::List, |st, l| st.write_any_list(l)),
            List::Compound(cl) => self.write_list(cl, Tag::Compound, |st, c| st.write_compound(c)),
            List::IntArray(ial) => {
                self.write_list(ial, Tag::IntArray, |st, ia| st.write_int_array(ia))
            }
            List::LongArray(lal) => {
                self.write_list(lal, Tag::LongArray, |st, la| st.write_long_array(la))
            }
        };

        self.depth -= 1;
        res
    }

    fn write_list<T, F>(&mut self, list: &[T], elem_type: Tag, mut write_elem: F) -> Result<()>
    where
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        self.write_tag(elem_type)?;
        self.write_len(list.len(), "list")?;

        for elem in list {
            write_elem(self, elem)?;
        }

        Ok(())
    }

    fn write_compound(&mut self, c: &Compound) -> Result<()> {
        self.enter()?;

        for (k, v) in c {
            self.write_named(k, v)?;
        }
        self.write_tag(Tag::End)?;

        self.depth -= 1;
        Ok(())
    }

    fn write_int_array(&mut self, ia: &[i32]) -> Result<()> {
        self.write_len(ia.len(), "int array")?;

        for i in ia {
            self.writer.write_i32::<BigEndian>(*i)?;
        }

        Ok(())
    }

    fn write_long_array(&mut self, la: &[i64]) -> Result<()> {
        self.write_len(la.len(), "long array")?;

        for l in la {
            self.writer.write_i64::<BigEndian>(*l)?;
        }

        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::format(format!(
                "nesting exceeds maximum depth of {MAX_DEPTH}"
            )));
        }

        self.depth += 1;
        Ok(())
    }
}

fn i8_slice_as_u8_slice(slice: &[i8]) -> &[u8] {
    // SAFETY: i8 has the same layout as u8.
    unsafe { std::slice::from_raw_parts(slice.as_ptr().cast::<u8>(), slice.len()) }
}

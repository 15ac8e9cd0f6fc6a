//! Support for serializing and deserializing NBT in its binary format.
//!
//! Multi-byte numbers are big-endian. Names and strings are prefixed by their
//! UTF-8 byte length as an unsigned 16-bit integer; array and list lengths are
//! signed 32-bit integers.
//!
//! # Examples
//!
//! ```
//! use nbt_codec::{compound, to_binary, List, NamedTag};
//!
//! let c = compound! {
//!     "byte" => 5_i8,
//!     "string" => "hello",
//!     "list_of_float" => List::Float(vec![
//!         std::f32::consts::PI,
//!         std::f32::consts::E,
//!         1.4142
//!     ]),
//! };
//!
//! let root = NamedTag::unnamed(c);
//! let mut buf = vec![];
//!
//! let written = to_binary(&root, &mut buf).unwrap();
//! assert_eq!(written, buf.len());
//! assert_eq!(written, root.written_size());
//! ```
//!
//! Decode NBT data from its binary form.
//!
//! ```
//! use nbt_codec::{compound, from_binary, Value};
//!
//! let some_bytes = [10, 0, 0, 3, 0, 3, 105, 110, 116, 0, 0, 222, 173, 0];
//!
//! let expected_value = compound! {
//!     "int" => 0xdead
//! };
//!
//! let root = from_binary(some_bytes.as_slice()).unwrap();
//!
//! assert_eq!(root.value, Value::Compound(expected_value));
//! assert_eq!(root.name(), None);
//! ```

mod decode;
mod encode;

pub use decode::*;
pub use encode::*;

pub use crate::{Error, Result};

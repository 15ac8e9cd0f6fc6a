//! Support for the textual form of NBT, known as SNBT.
//!
//! SNBT is quite similar to JSON, but with some differences. See [the wiki]
//! for more information.
//!
//! Parsing happens in two passes. [`Tokenizer`] turns the whole input into
//! tokens up front, never failing, and [`SnbtParser`] builds the tree from
//! them. The tokenizer decides whether a span is a compound key by looking at
//! the character right after it: `"a:b":1` yields the key `a:b`, while a
//! quoted span with no `:` after it is a string value.
//!
//! Numbers take their kind from their suffix: `b`, `s`, `l`, `f` and `d` for
//! byte, short, long, float and double. An unsuffixed number is an int, or a
//! double if it contains a decimal point.
//!
//! # Examples
//!
//! ```
//! use nbt_codec::{compound, from_snbt_str, to_snbt_string, List, NamedTag};
//!
//! let root = from_snbt_str("{pos: [1.5, 2d, -3.0], name: \"Steve\"}").unwrap();
//!
//! let expected = compound! {
//!     "pos" => List::Double(vec![1.5, 2.0, -3.0]),
//!     "name" => "Steve",
//! };
//!
//! assert_eq!(root, NamedTag::unnamed(expected));
//! assert_eq!(to_snbt_string(&root), r#"{pos:[1.5d,2d,-3d],name:"Steve"}"#);
//! ```
//!
//! [the wiki]: https://minecraft.wiki/w/NBT_format#SNBT_format

mod parse;
#[cfg(test)]
mod tests;
mod token;
mod write;

pub use parse::*;
pub use token::*;
pub use write::*;

pub use crate::{Error, Result, SyntaxError};

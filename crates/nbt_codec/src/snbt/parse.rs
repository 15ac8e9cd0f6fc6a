use std::str::FromStr;
use std::vec;

use super::token::{Token, TokenKind, Tokenizer};
use super::{Error, Result, SyntaxError};
use crate::tag::Tag;
use crate::{Compound, List, NamedTag, Value, MAX_DEPTH};

/// Parses an SNBT document into a [`NamedTag`].
///
/// The document is a single value, optionally prefixed by a root name
/// (`name:value`). Anything other than whitespace after that value is a
/// [`SyntaxError`].
///
/// ```
/// use nbt_codec::{from_snbt_str, Value};
///
/// let root = from_snbt_str("1f").unwrap();
/// assert_eq!(root.value, Value::Float(1.0));
/// assert_eq!(root.name(), None);
///
/// let root = from_snbt_str("level: {}").unwrap();
/// assert_eq!(root.name(), Some("level"));
/// ```
pub fn from_snbt_str(snbt: &str) -> Result<NamedTag> {
    let mut parser = SnbtParser::new(snbt);
    let root = parser.parse_object()?;
    parser.expect_end()?;
    Ok(root)
}

impl FromStr for NamedTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_snbt_str(s)
    }
}

/// A recursive descent parser over the tokens of one SNBT document.
///
/// All parsing state lives in the parser, so independent documents can be
/// parsed concurrently with separate parsers.
pub struct SnbtParser<'a> {
    src: &'a str,
    tokens: vec::IntoIter<Token<'a>>,
    /// Byte offset just past the last consumed token.
    consumed: usize,
    depth: usize,
}

impl<'a> SnbtParser<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            tokens: Tokenizer::new(src).collect::<Vec<_>>().into_iter(),
            consumed: 0,
            depth: 0,
        }
    }

    /// Parses the next object, which is a value with an optional `name:`
    /// prefix. Input after the object is left unread.
    pub fn parse_object(&mut self) -> Result<NamedTag> {
        let token = self.advance()?;
        self.parse_object_at(token)
    }

    /// Get the number of bytes read.
    ///
    /// It's useful when you want to read an SNBT value from a command argument
    /// since there may be trailing data.
    pub fn bytes_read(&self) -> usize {
        self.consumed
    }

    fn expect_end(&mut self) -> Result<()> {
        match self
            .tokens
            .find(|t| !matches!(t.kind, TokenKind::Whitespace))
        {
            Some(token) => Err(self.error_at(
                token.offset,
                format!("unexpected {} after the end of the document", token.kind),
            )),
            None => Ok(()),
        }
    }

    /// Moves to the next significant token. Whitespace and commas are skipped.
    fn advance(&mut self) -> Result<Token<'a>> {
        for token in self.tokens.by_ref() {
            self.consumed = token.end();

            if !matches!(token.kind, TokenKind::Whitespace | TokenKind::Comma) {
                return Ok(token);
            }
        }

        Err(self.error_at(self.src.len(), "unexpected end of input"))
    }

    fn parse_object_at(&mut self, token: Token<'a>) -> Result<NamedTag> {
        let (name, token) = match token.kind {
            TokenKind::Identifier(name) => {
                let separator = self.advance()?;

                if separator.kind != TokenKind::Separator {
                    return Err(self.unexpected(&separator, "':'"));
                }

                (name.into_owned(), self.advance()?)
            }
            _ => (String::new(), token),
        };

        let value = self.parse_value(token)?;

        Ok(NamedTag { name, value })
    }

    fn parse_value(&mut self, token: Token<'a>) -> Result<Value> {
        Ok(match token.kind {
            TokenKind::String(s) => Value::String(s.into_owned()),
            TokenKind::Byte(v) => self.integer(Tag::Byte, v, token.offset)?,
            TokenKind::Short(v) => self.integer(Tag::Short, v, token.offset)?,
            TokenKind::Int(v) => self.integer(Tag::Int, v, token.offset)?,
            TokenKind::Long(v) => Value::Long(v),
            TokenKind::Float(v) => Value::Float(v),
            TokenKind::Double(v) => Value::Double(v),
            TokenKind::ByteArrayBegin => Value::ByteArray(self.parse_array(Tag::ByteArray)?),
            TokenKind::IntArrayBegin => Value::IntArray(self.parse_array(Tag::IntArray)?),
            TokenKind::LongArrayBegin => Value::LongArray(self.parse_array(Tag::LongArray)?),
            TokenKind::ListBegin => Value::List(self.nested(Self::parse_list)?),
            TokenKind::CompoundBegin => Value::Compound(self.nested(Self::parse_compound)?),
            _ => return Err(self.unexpected(&token, "a value")),
        })
    }

    /// Parses the elements of a typed array up to the closing `]`.
    ///
    /// Elements are literals of the array's own kind or unsuffixed integers,
    /// and must fit the element type.
    fn parse_array<T: TryFrom<i64>>(&mut self, array: Tag) -> Result<Vec<T>> {
        let elem = match array {
            Tag::ByteArray => Tag::Byte,
            Tag::IntArray => Tag::Int,
            _ => Tag::Long,
        };

        let mut values = Vec::new();

        loop {
            let token = self.advance()?;

            let v = match token.kind {
                TokenKind::ArrayEnd => break,
                TokenKind::Int(v) => v,
                TokenKind::Byte(v) if elem == Tag::Byte => v,
                TokenKind::Long(v) if elem == Tag::Long => v,
                TokenKind::Byte(_)
                | TokenKind::Short(_)
                | TokenKind::Long(_)
                | TokenKind::Float(_)
                | TokenKind::Double(_) => {
                    let e =
                        Error::type_error(format!("{} is not allowed in a {array}", token.kind));
                    return Err(self.locate(e, token.offset));
                }
                _ => return Err(self.unexpected(&token, "an array element or ']'")),
            };

            match T::try_from(v) {
                Ok(v) => values.push(v),
                Err(_) => return Err(self.locate(Error::range(elem, v), token.offset)),
            }
        }

        Ok(values)
    }

    fn parse_list(&mut self) -> Result<List> {
        let mut elems = Vec::new();

        loop {
            let token = self.advance()?;

            if token.kind == TokenKind::ArrayEnd {
                break;
            }

            let offset = token.offset;

            // List elements are unnamed, so a name prefix is dropped.
            let value = self.parse_object_at(token)?.value;

            if elems.first().is_some_and(|first: &Value| first.tag() != value.tag()) {
                let e = Error::format("lists must contain only the same child type");
                return Err(self.locate(e, offset));
            }

            elems.push(value);
        }

        if elems.is_empty() {
            return Ok(List::End);
        }

        List::try_from(elems)
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        loop {
            let token = self.advance()?;

            match token.kind {
                TokenKind::CompoundEnd => break,
                TokenKind::Identifier(_) => {
                    let entry = self.parse_object_at(token)?;
                    compound.push(entry.name, entry.value);
                }
                _ => return Err(self.unexpected(&token, "a name or '}'")),
            }
        }

        Ok(compound)
    }

    /// Runs `f` one level deeper, failing if that exceeds [`MAX_DEPTH`].
    fn nested<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_at(
                self.consumed,
                format!("nesting exceeds maximum depth of {MAX_DEPTH}"),
            ));
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn integer(&self, tag: Tag, v: i64, offset: usize) -> Result<Value> {
        Value::from_integer(tag, v).map_err(|e| self.locate(e, offset))
    }

    fn locate(&self, e: Error, offset: usize) -> Error {
        let (line, column) = self.location(offset);
        e.with_location(line, column)
    }

    fn unexpected(&self, token: &Token<'_>, expected: &str) -> Error {
        self.error_at(
            token.offset,
            format!("expected {expected}, found {}", token.kind),
        )
    }

    fn error_at<M: Into<Box<str>>>(&self, offset: usize, msg: M) -> Error {
        let (line, column) = self.location(offset);
        SyntaxError::new(msg, line, column).into()
    }

    /// One-based line and column of a byte offset.
    fn location(&self, offset: usize) -> (usize, usize) {
        let before = &self.src[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);

        (line, before[line_start..].chars().count() + 1)
    }
}

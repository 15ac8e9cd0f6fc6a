use std::borrow::Cow;
use std::fmt;
use std::iter::FusedIterator;

/// A single lexical unit of an SNBT document.
#[derive(Clone, PartialEq, Debug)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Byte offset of the first significant character of the token. Leading
    /// whitespace absorbed by the token is not included.
    pub offset: usize,
    /// Number of bytes from `offset` to the end of the token, including any
    /// trailing whitespace it absorbed.
    pub len: usize,
}

impl Token<'_> {
    /// Byte offset just past the end of this token.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind<'a> {
    CompoundBegin,
    CompoundEnd,
    /// A compound key, quoted or bare, immediately followed by `:`.
    Identifier(Cow<'a, str>),
    /// A quoted string or a bare word.
    String(Cow<'a, str>),
    Separator,
    Comma,
    ByteArrayBegin,
    IntArrayBegin,
    LongArrayBegin,
    ListBegin,
    ArrayEnd,
    Float(f32),
    Double(f64),
    /// Integer literals keep their full value. Whether it fits the kind named
    /// by the suffix is checked when the tree is built.
    Byte(i64),
    Short(i64),
    Int(i64),
    Long(i64),
    Whitespace,
    Char(char),
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompoundBegin => f.write_str("'{'"),
            Self::CompoundEnd => f.write_str("'}'"),
            Self::Identifier(s) => write!(f, "name {s:?}"),
            Self::String(s) => write!(f, "string {s:?}"),
            Self::Separator => f.write_str("':'"),
            Self::Comma => f.write_str("','"),
            Self::ByteArrayBegin => f.write_str("'[B;'"),
            Self::IntArrayBegin => f.write_str("'[I;'"),
            Self::LongArrayBegin => f.write_str("'[L;'"),
            Self::ListBegin => f.write_str("'['"),
            Self::ArrayEnd => f.write_str("']'"),
            Self::Float(v) => write!(f, "float {v}"),
            Self::Double(v) => write!(f, "double {v}"),
            Self::Byte(v) => write!(f, "byte {v}"),
            Self::Short(v) => write!(f, "short {v}"),
            Self::Int(v) => write!(f, "int {v}"),
            Self::Long(v) => write!(f, "long {v}"),
            Self::Whitespace => f.write_str("whitespace"),
            Self::Char(c) => write!(f, "{c:?}"),
        }
    }
}

/// Splits an SNBT document into [`Token`]s.
///
/// Tokenizing never fails. Input that matches no other rule comes out as a
/// bare [`TokenKind::String`] or a single [`TokenKind::Char`], and it is up
/// to the parser to reject it. A clone continues independently from the same
/// position.
///
/// ```
/// use nbt_codec::snbt::{TokenKind, Tokenizer};
///
/// let kinds: Vec<_> = Tokenizer::new("[B; 1b, 2]").map(|t| t.kind).collect();
///
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::ByteArrayBegin,
///         TokenKind::Byte(1),
///         TokenKind::Comma,
///         TokenKind::Int(2),
///         TokenKind::ArrayEnd,
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// The byte offset of the next token.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        let rest = &src[self.pos..];
        let first = rest.chars().next()?;

        let (kind, skipped, len) = scan(rest, first);

        let token = Token {
            kind,
            offset: self.pos + skipped,
            len: len - skipped,
        };

        self.pos += len;
        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Scans one token at the start of `rest`, returning its kind, the number of
/// leading whitespace bytes it absorbed and its total length in bytes.
fn scan(rest: &str, first: char) -> (TokenKind<'_>, usize, usize) {
    let ws = whitespace_len(rest);
    let after = &rest[ws..];

    if first == '{' {
        return (TokenKind::CompoundBegin, 0, 1 + whitespace_len(&rest[1..]));
    }

    if after.starts_with('}') {
        return (TokenKind::CompoundEnd, ws, ws + 1);
    }

    if first == '"' || first == '\'' {
        return match scan_quoted(rest, first) {
            Some((s, len)) if rest[len..].starts_with(':') => (TokenKind::Identifier(s), 0, len),
            Some((s, len)) => (TokenKind::String(s), 0, len),
            // Unterminated.
            None => (TokenKind::Char(first), 0, 1),
        };
    }

    let ident = rest
        .bytes()
        .take_while(|&b| is_identifier_byte(b))
        .count();

    if ident > 0 && rest[ident..].starts_with(':') {
        return (TokenKind::Identifier(Cow::Borrowed(&rest[..ident])), 0, ident);
    }

    if let Some(tail) = after.strip_prefix(':') {
        return (TokenKind::Separator, ws, ws + 1 + whitespace_len(tail));
    }

    if let Some(tail) = after.strip_prefix(',') {
        return (TokenKind::Comma, ws, ws + 1 + whitespace_len(tail));
    }

    for (prefix, kind) in [
        ("[B;", TokenKind::ByteArrayBegin),
        ("[I;", TokenKind::IntArrayBegin),
        ("[L;", TokenKind::LongArrayBegin),
    ] {
        if let Some(tail) = rest.strip_prefix(prefix) {
            return (kind, 0, prefix.len() + whitespace_len(tail));
        }
    }

    if first == '[' {
        return (TokenKind::ListBegin, 0, 1 + whitespace_len(&rest[1..]));
    }

    if after.starts_with(']') {
        return (TokenKind::ArrayEnd, ws, ws + 1);
    }

    if let Some((kind, len)) = scan_number(rest) {
        return (kind, 0, len);
    }

    if ws > 0 {
        return (TokenKind::Whitespace, 0, ws);
    }

    let word = rest
        .find(|c: char| c.is_whitespace() || is_structural(c))
        .unwrap_or(rest.len());

    if word > 0 {
        let kind = match &rest[..word] {
            "true" => TokenKind::Byte(1),
            "false" => TokenKind::Byte(0),
            w => TokenKind::String(Cow::Borrowed(w)),
        };
        return (kind, 0, word);
    }

    (TokenKind::Char(first), 0, first.len_utf8())
}

fn whitespace_len(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Characters a compound key may contain without being quoted.
pub(crate) fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_structural(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | ',' | ':' | '"' | '\'')
}

/// Scans a quoted span starting with `quote`, returning its unescaped content
/// and its length including both quotes. Returns `None` if the closing quote
/// is missing.
fn scan_quoted(rest: &str, quote: char) -> Option<(Cow<'_, str>, usize)> {
    let body = &rest[1..];

    let mut unescaped: Option<String> = None;
    let mut segment_start = 0;
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == quote {
            let content = match unescaped {
                Some(mut s) => {
                    s.push_str(&body[segment_start..i]);
                    Cow::Owned(s)
                }
                None => Cow::Borrowed(&body[..i]),
            };

            return Some((content, i + 2));
        }

        if c == '\\' {
            match chars.clone().next() {
                Some((j, escaped)) if escaped == quote || escaped == '\\' => {
                    let s = unescaped.get_or_insert_with(String::new);
                    s.push_str(&body[segment_start..i]);
                    s.push(escaped);

                    chars.next();
                    segment_start = j + 1;
                }
                // Any other backslash is kept as written.
                _ => {}
            }
        }
    }

    None
}

/// Scans a numeric literal with an optional kind suffix. The literal must end
/// at a delimiter, otherwise it is part of a bare word.
fn scan_number(rest: &str) -> Option<(TokenKind<'_>, usize)> {
    let bytes = rest.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut i = usize::from(bytes.first() == Some(&b'-'));

    let int_digits = digits(i);
    i += int_digits;

    let mut frac_digits = 0;
    let decimal = bytes.get(i) == Some(&b'.');

    if decimal {
        i += 1;
        frac_digits = digits(i);
        i += frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    let literal = &rest[..i];
    let suffix = bytes
        .get(i)
        .filter(|b| b.is_ascii_alphabetic())
        .map(u8::to_ascii_lowercase);

    let end = i + usize::from(suffix.is_some());

    if rest[end..]
        .chars()
        .next()
        .is_some_and(|c| !c.is_whitespace() && !is_structural(c))
    {
        return None;
    }

    let kind = match (suffix, decimal) {
        (Some(b'f'), _) => TokenKind::Float(literal.parse().ok()?),
        (Some(b'd'), _) | (None, true) => TokenKind::Double(literal.parse().ok()?),
        (None, false) => TokenKind::Int(literal.parse().ok()?),
        (Some(b'b'), false) => TokenKind::Byte(literal.parse().ok()?),
        (Some(b's'), false) => TokenKind::Short(literal.parse().ok()?),
        (Some(b'l'), false) => TokenKind::Long(literal.parse().ok()?),
        _ => return None,
    };

    Some((kind, end))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind<'_>> {
        Tokenizer::new(src).map(|t| t.kind).collect()
    }

    fn string(s: &str) -> TokenKind<'_> {
        TokenKind::String(Cow::Borrowed(s))
    }

    fn ident(s: &str) -> TokenKind<'_> {
        TokenKind::Identifier(Cow::Borrowed(s))
    }

    #[test]
    fn structural_tokens_absorb_whitespace() {
        assert_eq!(
            kinds("{ a : 1 , b:2 }"),
            [
                TokenKind::CompoundBegin,
                string("a"),
                TokenKind::Separator,
                TokenKind::Int(1),
                TokenKind::Comma,
                ident("b"),
                TokenKind::Separator,
                TokenKind::Int(2),
                TokenKind::CompoundEnd,
            ]
        );
    }

    #[test]
    fn quoted_key_needs_colon() {
        assert_eq!(
            kinds(r#"{"a:b":1}"#),
            [
                TokenKind::CompoundBegin,
                ident("a:b"),
                TokenKind::Separator,
                TokenKind::Int(1),
                TokenKind::CompoundEnd,
            ]
        );

        assert_eq!(
            kinds(r#"{"x"}"#),
            [TokenKind::CompoundBegin, string("x"), TokenKind::CompoundEnd]
        );
    }

    #[test]
    fn numeric_suffixes() {
        assert_eq!(
            kinds("1b 2S 3 4l 5.5 6.5f 7d 8F -9 .5 1."),
            [
                TokenKind::Byte(1),
                TokenKind::Whitespace,
                TokenKind::Short(2),
                TokenKind::Whitespace,
                TokenKind::Int(3),
                TokenKind::Whitespace,
                TokenKind::Long(4),
                TokenKind::Whitespace,
                TokenKind::Double(5.5),
                TokenKind::Whitespace,
                TokenKind::Float(6.5),
                TokenKind::Whitespace,
                TokenKind::Double(7.0),
                TokenKind::Whitespace,
                TokenKind::Float(8.0),
                TokenKind::Whitespace,
                TokenKind::Int(-9),
                TokenKind::Whitespace,
                TokenKind::Double(0.5),
                TokenKind::Whitespace,
                TokenKind::Double(1.0),
            ]
        );
    }

    #[test]
    fn numbers_must_end_at_delimiter() {
        assert_eq!(kinds("12abc"), [string("12abc")]);
        assert_eq!(kinds("1.5b"), [string("1.5b")]);
        assert_eq!(kinds("-"), [string("-")]);
        assert_eq!(
            kinds("[1]"),
            [TokenKind::ListBegin, TokenKind::Int(1), TokenKind::ArrayEnd]
        );
    }

    #[test]
    fn huge_integer_is_a_word() {
        assert_eq!(
            kinds("99999999999999999999"),
            [string("99999999999999999999")]
        );
    }

    #[test]
    fn booleans_are_bytes() {
        assert_eq!(
            kinds("true false truer"),
            [
                TokenKind::Byte(1),
                TokenKind::Whitespace,
                TokenKind::Byte(0),
                TokenKind::Whitespace,
                string("truer"),
            ]
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(
            kinds(r#""a\"b\\c\n" 'it\'s'"#),
            [
                TokenKind::String(Cow::Owned("a\"b\\c\\n".to_owned())),
                TokenKind::Whitespace,
                TokenKind::String(Cow::Owned("it's".to_owned())),
            ]
        );
    }

    #[test]
    fn fallbacks() {
        assert_eq!(kinds("\"open"), [TokenKind::Char('"'), string("open")]);
        assert_eq!(
            kinds("[ B ]"),
            [TokenKind::ListBegin, string("B"), TokenKind::ArrayEnd]
        );
        assert_eq!(kinds(":"), [TokenKind::Separator]);
    }

    #[test]
    fn offsets_cover_input() {
        let src = "{ key: [I; 1, 2] }";
        let tokens: Vec<_> = Tokenizer::new(src).collect();

        assert_eq!(tokens[1].offset, 2);
        assert_eq!(tokens[1].kind, ident("key"));
        assert_eq!(tokens.last().map(Token::end), Some(src.len()));

        for pair in tokens.windows(2) {
            assert!(pair[0].end() <= pair[1].offset);
        }
    }

    #[test]
    fn restartable() {
        let tokenizer = Tokenizer::new("{a:[1,2]}");
        let first: Vec<_> = tokenizer.clone().collect();
        let second: Vec<_> = tokenizer.collect();

        assert_eq!(first, second);
    }
}

use pretty_assertions::assert_eq;

use super::*;
use crate::tag::Tag;
use crate::{compound, Compound, List, NamedTag, Value, MAX_DEPTH};

fn parse(snbt: &str) -> Value {
    from_snbt_str(snbt).unwrap().value
}

fn syntax_error(snbt: &str) -> SyntaxError {
    match from_snbt_str(snbt) {
        Err(Error::Syntax(e)) => e,
        other => panic!("expected a syntax error for {snbt:?}, got {other:?}"),
    }
}

#[test]
fn test_parse() {
    let str = r#"
        {
            foo: 1,
            'bar': 1.0,
            "baz": 1.0f,
            "hello'": "hello world",
            "world": "hello\"world",
            3b: 2f,
            bool: false,
            more: {
                iarr: [I; 1, 2, 3],
                larr: [L; 1L, 2L, 3L],
            },
            empty: [Bibabo ],
        }
    "#;

    let root = from_snbt_str(str).unwrap();
    assert_eq!(root.name(), None);

    let cpd = root.value.as_compound().unwrap();
    assert_eq!(cpd["foo"], Value::Int(1));
    assert_eq!(cpd["bar"], Value::Double(1.0));
    assert_eq!(cpd["baz"], Value::Float(1.0));
    assert_eq!(cpd["hello'"], Value::String("hello world".into()));
    assert_eq!(cpd["world"], Value::String("hello\"world".into()));
    assert_eq!(cpd["3b"], Value::Float(2.0));
    assert_eq!(cpd["bool"], Value::Byte(0));

    let more = cpd["more"].as_compound().unwrap();
    assert_eq!(more["iarr"], Value::IntArray(vec![1, 2, 3]));
    assert_eq!(more["larr"], Value::LongArray(vec![1, 2, 3]));

    assert_eq!(
        cpd["empty"],
        Value::List(List::String(vec!["Bibabo".to_owned()]))
    );

    let keys: Vec<_> = cpd.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["foo", "bar", "baz", "hello'", "world", "3b", "bool", "more", "empty"]
    );
}

#[test]
fn quoted_key_with_colon() {
    assert_eq!(parse(r#"{"a:b":1}"#), Value::Compound(compound!("a:b" => 1)));
}

#[test]
fn compound_entry_without_name() {
    syntax_error(r#"{"x"}"#);
    syntax_error("{ {}, }");
    syntax_error("{ foo 1 }");
    syntax_error("{ foo: }");
}

#[test]
fn homogeneous_list() {
    assert_eq!(parse("[1,2,3]"), Value::List(List::Int(vec![1, 2, 3])));
    assert_eq!(
        parse("[[1b], [], [2s]]"),
        Value::List(List::List(vec![
            List::Byte(vec![1]),
            List::End,
            List::Short(vec![2]),
        ]))
    );
}

#[test]
fn heterogeneous_list() {
    for (snbt, column) in [(r#"[1,"a"]"#, 4), ("[{}, []]", 6), ("[1, 1b]", 5)] {
        match from_snbt_str(snbt) {
            Err(Error::Format(msg)) => {
                assert_eq!(
                    &*msg,
                    format!("lists must contain only the same child type (at 1,{column})")
                );
            }
            other => panic!("expected a format error for {snbt:?}, got {other:?}"),
        }
    }
}

#[test]
fn empty_list() {
    let value = parse("[]");

    let list = value.as_list().unwrap();
    assert_eq!(list.element_tag(), Tag::End);
    assert!(list.is_empty());
}

#[test]
fn list_elements_drop_names() {
    assert_eq!(parse("[a: 1, b: 2]"), Value::List(List::Int(vec![1, 2])));
}

#[test]
fn integer_ranges() {
    assert_eq!(parse("127b"), Value::Byte(127));
    assert_eq!(parse("-128b"), Value::Byte(-128));
    assert_eq!(parse("32767s"), Value::Short(32767));
    assert_eq!(parse("2147483647"), Value::Int(i32::MAX));
    assert_eq!(parse("-9223372036854775808l"), Value::Long(i64::MIN));

    for (snbt, tag) in [
        ("128b", Tag::Byte),
        ("32768s", Tag::Short),
        ("2147483648", Tag::Int),
        ("[B; 1, 300]", Tag::Byte),
        ("[I; 4294967296]", Tag::Int),
    ] {
        match from_snbt_str(snbt) {
            Err(Error::Range { tag: t, .. }) => assert_eq!(t, tag, "{snbt}"),
            other => panic!("expected a range error for {snbt:?}, got {other:?}"),
        }
    }
}

#[test]
fn value_errors_report_location() {
    match from_snbt_str("{\n  a: 128b\n}") {
        Err(e @ Error::Range { .. }) => {
            assert!(matches!(e, Error::Range { at: Some((2, 6)), .. }), "{e:?}");
            assert_eq!(
                e.to_string(),
                "128 is out of range for byte (expected -128..=127) (at 2,6)"
            );
        }
        other => panic!("expected a range error, got {other:?}"),
    }

    assert!(matches!(
        from_snbt_str("[B; 1, 300]"),
        Err(Error::Range { at: Some((1, 8)), .. })
    ));

    match from_snbt_str("[I; 1b]") {
        Err(Error::Type(msg)) => assert!(msg.ends_with("(at 1,5)"), "{msg}"),
        other => panic!("expected a type error, got {other:?}"),
    }
}

#[test]
fn typed_arrays() {
    assert_eq!(parse("[B; 1b, 2, true]"), Value::ByteArray(vec![1, 2, 1]));
    assert_eq!(parse("[I;]"), Value::IntArray(vec![]));
    assert_eq!(parse("[L; -1, 2l]"), Value::LongArray(vec![-1, 2]));

    for snbt in ["[B; 1, 2s]", "[I; 1b]", "[L; 1.5]", "[I; 2f]"] {
        assert!(
            matches!(from_snbt_str(snbt), Err(Error::Type(_))),
            "{snbt}"
        );
    }

    syntax_error("[I; 1, \"2\"]");
    syntax_error("[B; [1b]]");
}

#[test]
fn root_name() {
    let root = from_snbt_str("level : 1").unwrap_err();
    assert!(matches!(root, Error::Syntax(_)));

    let root = from_snbt_str("'The root': {a: 1b}").unwrap();
    assert_eq!(root.name(), Some("The root"));
    assert_eq!(root.value, Value::Compound(compound!("a" => 1_i8)));
}

#[test]
fn unexpected_end() {
    let e = syntax_error("[L; 1L, 2L, 3L");
    assert_eq!(&*e.message, "unexpected end of input");

    syntax_error("");
    syntax_error("{a: [1, 2}");
    syntax_error("  ");
}

#[test]
fn trailing_data() {
    syntax_error("[L; 1L, 2L, 3L,]dewdwe");
    syntax_error("{} {}");
    syntax_error("1 2");

    assert_eq!(parse("{}  \n"), Value::Compound(Compound::new()));
}

#[test]
fn bytes_read_stops_after_object() {
    let mut parser = SnbtParser::new("{a:1} rest");

    assert_eq!(
        parser.parse_object().unwrap(),
        NamedTag::unnamed(compound!("a" => 1))
    );
    assert_eq!(parser.bytes_read(), 5);
}

#[test]
fn error_location() {
    let e = syntax_error("{\n  a: }");

    assert_eq!((e.line, e.column), (2, 6));
    assert_eq!(e.to_string(), "@ 2,6: expected a value, found '}'");
}

#[test]
fn depth_limit() {
    let ok = [["["; MAX_DEPTH].concat(), ["]"; MAX_DEPTH].concat()].concat();
    assert!(from_snbt_str(&ok).is_ok());

    let too_deep = [["["; MAX_DEPTH + 1].concat(), ["]"; MAX_DEPTH + 1].concat()].concat();
    let e = syntax_error(&too_deep);
    assert!(e.message.contains("maximum depth"), "{e}");
}

#[test]
fn round_trip() {
    let snbt = r#"
        {
            byte: 5b, short: -3s, int: 7, long: 9l, float: 0.25f, double: -1.5,
            "quoted key": "a \"quote\" and a \\ backslash",
            "": "empty key",
            bytes: [B; 1b, -2b], ints: [I; 3, 4], longs: [L; 5l],
            list_of_arrays: [[B; 1b], [B;]],
            list_of_lists: [[1], [], ["x"]],
            list_of_compounds: [{a: 1}, {b: {}}],
            nested: {deeper: {deepest: [1.5f, 2f]}},
            dup: 1, dup: 2,
        }
    "#;

    let parsed = from_snbt_str(snbt).unwrap();
    let written = to_snbt_string(&parsed);

    assert_eq!(from_snbt_str(&written).unwrap(), parsed);
}

#[test]
fn round_trip_named_root() {
    let root = NamedTag::new(
        "The root name‽",
        compound! {
            "list_of_string" => List::String(vec!["foo".to_owned(), "bar baz".to_owned()]),
            "int_array" => vec![5, -9, i32::MIN, 0, i32::MAX],
            "long" => i64::MAX,
            "float" => 1e10_f32,
            "double" => f64::MIN_POSITIVE,
        },
    );

    let written = to_snbt_string(&root);
    assert!(written.starts_with("\"The root name‽\":{"), "{written}");

    assert_eq!(from_snbt_str(&written).unwrap(), root);
    assert_eq!(written.parse::<NamedTag>().unwrap(), root);
}

#[test]
fn writer_output() {
    let root = NamedTag::new(
        "root",
        compound! {
            "b" => 1_i8,
            "bad key" => "v",
            "ba" => vec![1_i8, 2],
            "la" => List::LongArray(vec![vec![3]]),
        },
    );

    assert_eq!(
        to_snbt_string(&root),
        r#"root:{b:1b,"bad key":"v",ba:[B;1b,2b],la:[[L;3l]]}"#
    );
}

use std::fmt;

use super::token::is_identifier_byte;
use crate::{Compound, List, NamedTag, Value};

/// Writes values as SNBT into a string.
///
/// The output is compact and uses a suffix for every number kind except int,
/// so parsing it back yields the same kinds. Compound keys are quoted unless
/// they consist only of `[A-Za-z0-9_-]`, string values are always quoted.
pub struct SnbtWriter<'a> {
    output: &'a mut String,
}

impl<'a> SnbtWriter<'a> {
    pub fn new(output: &'a mut String) -> Self {
        Self { output }
    }

    fn write_key(&mut self, k: &str) {
        if !k.is_empty() && k.bytes().all(is_identifier_byte) {
            self.output.push_str(k);
        } else {
            self.write_string(k);
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                _ => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn write_primitive<T: fmt::Display>(&mut self, postfix: &str, value: T) {
        self.output.push_str(&value.to_string());
        self.output.push_str(postfix);
    }

    /// Writes `items` between brackets, separated by commas.
    fn write_seq<T, F>(&mut self, prefix: &str, items: &[T], mut write_item: F)
    where
        F: FnMut(&mut Self, &T),
    {
        self.output.push('[');
        self.output.push_str(prefix);

        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            write_item(self, item);
        }

        self.output.push(']');
    }

    fn write_list(&mut self, list: &List) {
        match list {
            List::End => self.output.push_str("[]"),
            List::Byte(v) => self.write_seq("", v, |w, v| w.write_primitive("b", v)),
            List::Short(v) => self.write_seq("", v, |w, v| w.write_primitive("s", v)),
            List::Int(v) => self.write_seq("", v, |w, v| w.write_primitive("", v)),
            List::Long(v) => self.write_seq("", v, |w, v| w.write_primitive("l", v)),
            List::Float(v) => self.write_seq("", v, |w, v| w.write_primitive("f", v)),
            List::Double(v) => self.write_seq("", v, |w, v| w.write_primitive("d", v)),
            List::ByteArray(v) => self.write_seq("", v, |w, v| w.write_byte_array(v)),
            List::String(v) => self.write_seq("", v, |w, v| w.write_string(v)),
            List::List(v) => self.write_seq("", v, |w, v| w.write_list(v)),
            List::Compound(v) => self.write_seq("", v, |w, v| w.write_compound(v)),
            List::IntArray(v) => self.write_seq("", v, |w, v| w.write_int_array(v)),
            List::LongArray(v) => self.write_seq("", v, |w, v| w.write_long_array(v)),
        }
    }

    fn write_byte_array(&mut self, v: &[i8]) {
        self.write_seq("B;", v, |w, v| w.write_primitive("b", v));
    }

    fn write_int_array(&mut self, v: &[i32]) {
        self.write_seq("I;", v, |w, v| w.write_primitive("", v));
    }

    fn write_long_array(&mut self, v: &[i64]) {
        self.write_seq("L;", v, |w, v| w.write_primitive("l", v));
    }

    fn write_compound(&mut self, compound: &Compound) {
        self.output.push('{');
        for (i, (k, v)) in compound.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_key(k);
            self.output.push(':');
            self.write_element(v);
        }
        self.output.push('}');
    }

    /// Write a value to the output.
    pub fn write_element(&mut self, value: &Value) {
        match value {
            Value::Byte(v) => self.write_primitive("b", v),
            Value::Short(v) => self.write_primitive("s", v),
            Value::Int(v) => self.write_primitive("", v),
            Value::Long(v) => self.write_primitive("l", v),
            Value::Float(v) => self.write_primitive("f", v),
            Value::Double(v) => self.write_primitive("d", v),
            Value::ByteArray(v) => self.write_byte_array(v),
            Value::IntArray(v) => self.write_int_array(v),
            Value::LongArray(v) => self.write_long_array(v),
            Value::String(v) => self.write_string(v),
            Value::List(v) => self.write_list(v),
            Value::Compound(v) => self.write_compound(v),
        }
    }

    /// Write a root to the output, prefixed by its name unless it is unnamed.
    pub fn write_named(&mut self, tag: &NamedTag) {
        if !tag.name.is_empty() {
            self.write_key(&tag.name);
            self.output.push(':');
        }
        self.write_element(&tag.value);
    }
}

/// Convert a root to a string in SNBT format.
pub fn to_snbt_string(tag: &NamedTag) -> String {
    let mut output = String::new();
    SnbtWriter::new(&mut output).write_named(tag);
    output
}

impl NamedTag {
    /// See [`to_snbt_string`].
    pub fn to_snbt(&self) -> String {
        to_snbt_string(self)
    }
}

impl Value {
    /// Convert this value to a string in SNBT format.
    ///
    /// ```
    /// use nbt_codec::{List, Value};
    ///
    /// let v = Value::List(List::Short(vec![1, -2]));
    /// assert_eq!(v.to_snbt(), "[1s,-2s]");
    /// ```
    pub fn to_snbt(&self) -> String {
        let mut output = String::new();
        SnbtWriter::new(&mut output).write_element(self);
        output
    }
}

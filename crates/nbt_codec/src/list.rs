use std::iter::FusedIterator;
use std::mem;

use crate::tag::Tag;
use crate::value::ValueRef;
use crate::{Compound, Error, Result, Value};

/// An NBT list value.
///
/// NBT lists are homogeneous, meaning each list element must be of the same
/// type. This is opposed to a format like JSON where lists can be
/// heterogeneous. Each variant holds the elements of one type, so a `List`
/// can never be in a heterogeneous state. Elements carry no names.
///
/// [`List::End`] is the empty list whose element type is `TAG_End`.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum List {
    #[default]
    End,
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    ByteArray(Vec<Vec<i8>>),
    String(Vec<String>),
    List(Vec<List>),
    Compound(Vec<Compound>),
    IntArray(Vec<Vec<i32>>),
    LongArray(Vec<Vec<i64>>),
}

macro_rules! with_elements {
    ($list:expr, $elems:ident => $body:expr, $end:expr) => {
        match $list {
            List::End => $end,
            List::Byte($elems) => $body,
            List::Short($elems) => $body,
            List::Int($elems) => $body,
            List::Long($elems) => $body,
            List::Float($elems) => $body,
            List::Double($elems) => $body,
            List::ByteArray($elems) => $body,
            List::String($elems) => $body,
            List::List($elems) => $body,
            List::Compound($elems) => $body,
            List::IntArray($elems) => $body,
            List::LongArray($elems) => $body,
        }
    };
}

macro_rules! match_kinds {
    ($list:expr, $value:expr, ($elems:ident, $v:ident) => $body:expr) => {
        match ($list, $value) {
            (List::Byte($elems), Value::Byte($v)) => $body,
            (List::Short($elems), Value::Short($v)) => $body,
            (List::Int($elems), Value::Int($v)) => $body,
            (List::Long($elems), Value::Long($v)) => $body,
            (List::Float($elems), Value::Float($v)) => $body,
            (List::Double($elems), Value::Double($v)) => $body,
            (List::ByteArray($elems), Value::ByteArray($v)) => $body,
            (List::String($elems), Value::String($v)) => $body,
            (List::List($elems), Value::List($v)) => $body,
            (List::Compound($elems), Value::Compound($v)) => $body,
            (List::IntArray($elems), Value::IntArray($v)) => $body,
            (List::LongArray($elems), Value::LongArray($v)) => $body,
            (list, value) => {
                return Err(Error::kind_mismatch(list.element_tag(), value.tag()))
            }
        }
    };
}

impl List {
    /// Returns an empty list whose element type is `tag`.
    pub fn empty_of(tag: Tag) -> Self {
        match tag {
            Tag::End => List::End,
            Tag::Byte => List::Byte(vec![]),
            Tag::Short => List::Short(vec![]),
            Tag::Int => List::Int(vec![]),
            Tag::Long => List::Long(vec![]),
            Tag::Float => List::Float(vec![]),
            Tag::Double => List::Double(vec![]),
            Tag::ByteArray => List::ByteArray(vec![]),
            Tag::String => List::String(vec![]),
            Tag::List => List::List(vec![]),
            Tag::Compound => List::Compound(vec![]),
            Tag::IntArray => List::IntArray(vec![]),
            Tag::LongArray => List::LongArray(vec![]),
        }
    }

    /// Returns the length of this list.
    pub fn len(&self) -> usize {
        with_elements!(self, l => l.len(), 0)
    }

    /// Returns `true` if this list has no elements. `false` otherwise.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element type of this list.
    pub fn element_tag(&self) -> Tag {
        match self {
            List::End => Tag::End,
            List::Byte(_) => Tag::Byte,
            List::Short(_) => Tag::Short,
            List::Int(_) => Tag::Int,
            List::Long(_) => Tag::Long,
            List::Float(_) => Tag::Float,
            List::Double(_) => Tag::Double,
            List::ByteArray(_) => Tag::ByteArray,
            List::String(_) => Tag::String,
            List::List(_) => Tag::List,
            List::Compound(_) => Tag::Compound,
            List::IntArray(_) => Tag::IntArray,
            List::LongArray(_) => Tag::LongArray,
        }
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<ValueRef<'_>> {
        match self {
            List::End => None,
            List::Byte(l) => l.get(index).map(ValueRef::Byte),
            List::Short(l) => l.get(index).map(ValueRef::Short),
            List::Int(l) => l.get(index).map(ValueRef::Int),
            List::Long(l) => l.get(index).map(ValueRef::Long),
            List::Float(l) => l.get(index).map(ValueRef::Float),
            List::Double(l) => l.get(index).map(ValueRef::Double),
            List::ByteArray(l) => l.get(index).map(|v| ValueRef::ByteArray(v)),
            List::String(l) => l.get(index).map(|v| ValueRef::String(v)),
            List::List(l) => l.get(index).map(ValueRef::List),
            List::Compound(l) => l.get(index).map(ValueRef::Compound),
            List::IntArray(l) => l.get(index).map(|v| ValueRef::IntArray(v)),
            List::LongArray(l) => l.get(index).map(|v| ValueRef::LongArray(v)),
        }
    }

    /// Appends an element.
    ///
    /// Pushing onto [`List::End`] turns it into a list of the value's type.
    /// Otherwise the value must match [`List::element_tag`] or an
    /// [`Error::Type`] is returned.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();

        if let List::End = self {
            *self = List::empty_of(value.tag());
        }

        match_kinds!(self, value, (l, v) => l.push(v));

        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        let len = self.len();

        if index >= len {
            return Err(Error::type_error(format!(
                "index {index} out of bounds for list of length {len}"
            )));
        }

        Ok(match_kinds!(self, value, (l, v) => mem::replace(&mut l[index], v).into()))
    }

    /// Removes the last element and returns it.
    pub fn pop(&mut self) -> Option<Value> {
        with_elements!(self, l => l.pop().map(Into::into), None)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            index: 0,
        }
    }
}

/// Builds a list from loose values, failing with [`Error::Type`] if they are
/// not all of the same type. No values produce [`List::End`].
impl TryFrom<Vec<Value>> for List {
    type Error = Error;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        let mut list = match values.first() {
            Some(first) => List::empty_of(first.tag()),
            None => return Ok(List::End),
        };

        for value in values {
            list.push(value)?;
        }

        Ok(list)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = ValueRef<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the elements of a [`List`].
#[derive(Clone)]
pub struct Iter<'a> {
    list: &'a List,
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = ValueRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.list.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for List {
                fn from(v: Vec<$ty>) -> Self {
                    List::$variant(v)
                }
            }
        )*
    };
}

impl_from_vec! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_end_type() {
        let l = List::default();
        assert_eq!(l.element_tag(), Tag::End);
        assert!(l.is_empty());
        assert_eq!(List::try_from(Vec::<Value>::new()).unwrap(), List::End);
    }

    #[test]
    fn push_adopts_first_type() {
        let mut l = List::End;
        l.push(1_i32).unwrap();
        l.push(2_i32).unwrap();
        assert_eq!(l, List::Int(vec![1, 2]));

        assert!(matches!(l.push("three"), Err(Error::Type(_))));
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn set_replaces_same_kind_only() {
        let mut l = List::String(vec!["a".into(), "b".into()]);

        let old = l.set(1, "c").unwrap();
        assert_eq!(old, Value::String("b".into()));
        assert_eq!(l.get(1), Some(ValueRef::String("c")));

        assert!(matches!(l.set(0, 5_i8), Err(Error::Type(_))));
        assert!(matches!(l.set(2, "d"), Err(Error::Type(_))));
    }

    #[test]
    fn heterogeneous_values_rejected() {
        let res = List::try_from(vec![Value::Int(1), Value::String("a".into())]);
        assert!(matches!(res, Err(Error::Type(_))));

        let ok = List::try_from(vec![Value::Long(1), Value::Long(2)]).unwrap();
        assert_eq!(ok, List::Long(vec![1, 2]));
    }

    #[test]
    fn iterate_and_pop() {
        let mut l = List::from(vec![1.5_f64, 2.5]);
        let collected: Vec<_> = l.iter().map(ValueRef::to_value).collect();
        assert_eq!(collected, vec![Value::Double(1.5), Value::Double(2.5)]);

        assert_eq!(l.pop(), Some(Value::Double(2.5)));
        assert_eq!(l.iter().len(), 1);
    }
}

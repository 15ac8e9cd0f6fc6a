use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ops::{Index, IndexMut};

use tracing::warn;

use crate::Value;

/// An ordered collection of named [`Value`]s.
///
/// Entries keep their insertion order. The binary format does not require
/// entry names to be unique, so a `Compound` may hold several entries with the
/// same name; lookups by name act on the first of them. Use
/// [`Compound::insert`] for map-like behavior and [`Compound::push`] to append
/// unconditionally.
#[derive(Clone, PartialEq, Default)]
pub struct Compound {
    entries: Vec<(String, Value)>,
}

impl fmt::Debug for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl Compound {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, k: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == k)
    }

    pub fn get(&self, k: &str) -> Option<&Value> {
        self.position(k).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, k: &str) -> bool {
        self.position(k).is_some()
    }

    pub fn get_mut(&mut self, k: &str) -> Option<&mut Value> {
        let i = self.position(k)?;
        Some(&mut self.entries[i].1)
    }

    pub fn get_key_value(&self, k: &str) -> Option<(&String, &Value)> {
        self.position(k)
            .map(|i| (&self.entries[i].0, &self.entries[i].1))
    }

    /// Returns the entry at position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&String, &Value)> {
        self.entries.get(index).map(|(k, v)| (k, v))
    }

    /// Replaces the value at position `index`, keeping its name. Returns the
    /// old value, or `None` (leaving the compound untouched) if out of bounds.
    pub fn set_index(&mut self, index: usize, v: impl Into<Value>) -> Option<Value> {
        let (_, slot) = self.entries.get_mut(index)?;
        Some(mem::replace(slot, v.into()))
    }

    /// Appends an entry without checking for an existing entry of the same
    /// name.
    pub fn push<K, V>(&mut self, k: K, v: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let k = k.into();

        if k.is_empty() {
            warn!("compound entry with an empty name");
        }

        self.entries.push((k, v.into()));
    }

    /// Appends without flagging empty names. Decoded data is taken as-is.
    pub(crate) fn push_entry(&mut self, k: String, v: Value) {
        self.entries.push((k, v));
    }

    /// Replaces the value of the first entry named `k`, or appends a new entry
    /// if there is none.
    pub fn insert<K, V>(&mut self, k: K, v: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let k = k.into();

        match self.position(&k) {
            Some(i) => Some(mem::replace(&mut self.entries[i].1, v.into())),
            None => {
                self.push(k, v);
                None
            }
        }
    }

    pub fn remove(&mut self, k: &str) -> Option<Value> {
        self.remove_entry(k).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, k: &str) -> Option<(String, Value)> {
        let i = self.position(k)?;
        Some(self.entries.remove(i))
    }

    pub fn append(&mut self, other: &mut Self) {
        self.entries.append(&mut other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.entries.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            iter: self.entries.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&String, &mut Value) -> bool,
    {
        self.entries.retain_mut(|(k, v)| f(k, v));
    }
}

impl Extend<(String, Value)> for Compound {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (String, Value)>,
    {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}

impl FromIterator<(String, Value)> for Compound {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (String, Value)>,
    {
        let mut c = Compound::new();
        c.extend(iter);
        c
    }
}

impl Index<&'_ str> for Compound {
    type Output = Value;

    fn index(&self, index: &str) -> &Self::Output {
        self.get(index).expect("no entry found for key")
    }
}

impl IndexMut<&'_ str> for Compound {
    fn index_mut(&mut self, index: &str) -> &mut Self::Output {
        self.get_mut(index).expect("no entry found for key")
    }
}

macro_rules! impl_iterator_traits {
    (($name:ident $($generics:tt)*) => $item:ty) => {
        impl $($generics)* Iterator for $name $($generics)* {
            type Item = $item;
            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next().map(|(k, v)| (k, v))
            }
            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }
        }

        impl $($generics)* DoubleEndedIterator for $name $($generics)* {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.iter.next_back().map(|(k, v)| (k, v))
            }
        }

        impl $($generics)* ExactSizeIterator for $name $($generics)* {
            #[inline]
            fn len(&self) -> usize {
                self.iter.len()
            }
        }

        impl $($generics)* FusedIterator for $name $($generics)* {}
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone)]
pub struct Iter<'a> {
    iter: std::slice::Iter<'a, (String, Value)>,
}

impl_iterator_traits!((Iter<'a>) => (&'a String, &'a Value));

impl<'a> IntoIterator for &'a mut Compound {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub struct IterMut<'a> {
    iter: std::slice::IterMut<'a, (String, Value)>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a String, &'a mut Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, v)| (&*k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for IterMut<'_> {}

impl FusedIterator for IterMut<'_> {}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.entries.into_iter(),
        }
    }
}

pub struct IntoIter {
    iter: std::vec::IntoIter<(String, Value)>,
}

impl_iterator_traits!((IntoIter) => (String, Value));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound;

    #[test]
    fn preserves_order() {
        let letters = ["g", "b", "d", "e", "h", "z", "m", "a", "q"];

        let mut c = Compound::new();
        for l in letters {
            c.insert(l, 0_i8);
        }

        for (k, l) in c.keys().zip(letters) {
            assert_eq!(k, l);
        }
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut c = compound! {
            "a" => 1,
            "b" => 2,
        };

        assert_eq!(c.insert("a", 10), Some(Value::Int(1)));
        assert_eq!(c.len(), 2);
        assert_eq!(c.get_index(0), Some((&"a".to_owned(), &Value::Int(10))));
    }

    #[test]
    fn push_keeps_duplicates() {
        let mut c = Compound::new();
        c.push("x", 1_i8);
        c.push("x", 2_i8);

        assert_eq!(c.len(), 2);
        assert_eq!(c["x"], Value::Byte(1));

        assert_eq!(c.remove("x"), Some(Value::Byte(1)));
        assert_eq!(c["x"], Value::Byte(2));
    }

    #[test]
    fn set_index_keeps_name() {
        let mut c = compound! { "k" => "v" };
        assert_eq!(c.set_index(0, 5_i64), Some(Value::String("v".into())));
        assert_eq!(c.set_index(1, 5_i64), None);
        assert_eq!(c["k"], Value::Long(5));
    }
}

//! Indexed collection of scraped records
//!
//! A [`Collection`] keeps two parallel sequences: string indexes and the
//! records they identify. Indexes are assigned in insertion order (`"0"`,
//! `"1"`, ...) and treated as opaque keys afterwards, so lookups can go by key,
//! by position, or project named attributes across every record at once.

mod record;

pub use record::Record;

use crate::{LookupError, LookupResult};
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// Width of the index column in the text rendering
const REPR_INDEX_WIDTH: usize = 10;

/// Append-only, insertion-ordered collection of records with string indexes
#[derive(Debug, Clone)]
pub struct Collection<T> {
    indexes: Vec<String>,
    items: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            indexes: Vec::new(),
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns the index assigned to it
    pub fn push(&mut self, item: T) -> &str {
        let position = self.items.len();
        let index = position.to_string();
        self.positions.insert(index.clone(), position);
        self.indexes.push(index);
        self.items.push(item);
        &self.indexes[position]
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a record by its index key
    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&position| &self.items[position])
    }

    /// Looks up a record by its index key, falling back to `default`
    pub fn get_or<'a>(&'a self, key: &str, default: &'a T) -> &'a T {
        self.get(key).unwrap_or(default)
    }

    /// Looks up a record by its index key, failing if the key is absent
    pub fn try_get(&self, key: &str) -> LookupResult<&T> {
        self.get(key)
            .ok_or_else(|| LookupError::MissingKey(key.to_string()))
    }

    /// "Relative get": looks up the record at a position
    ///
    /// Negative offsets count back from the end, so `-1` is the last record.
    ///
    /// # Examples
    ///
    /// ```
    /// use skyquake::Collection;
    ///
    /// let records: Collection<&str> = ["a", "b", "c"].into_iter().collect();
    /// assert_eq!(records.rget(0), Some(&"a"));
    /// assert_eq!(records.rget(-1), Some(&"c"));
    /// assert_eq!(records.rget(3), None);
    /// ```
    pub fn rget(&self, offset: isize) -> Option<&T> {
        self.resolve(offset).map(|position| &self.items[position])
    }

    /// Relative get, falling back to `default` when out of range
    pub fn rget_or<'a>(&'a self, offset: isize, default: &'a T) -> &'a T {
        self.rget(offset).unwrap_or(default)
    }

    /// Relative get, failing when out of range
    pub fn try_rget(&self, offset: isize) -> LookupResult<&T> {
        self.rget(offset).ok_or(LookupError::OutOfRange {
            offset,
            len: self.len(),
        })
    }

    fn resolve(&self, offset: isize) -> Option<usize> {
        let len = self.items.len();
        let position = if offset < 0 {
            len.checked_sub(offset.unsigned_abs())?
        } else {
            offset as usize
        };
        (position < len).then_some(position)
    }

    /// Iterates `(index, record)` pairs in insertion order
    ///
    /// Each call starts a fresh iteration.
    pub fn items(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.indexes
            .iter()
            .map(String::as_str)
            .zip(self.items.iter())
    }

    /// All indexes in insertion order
    pub fn indexes(&self) -> &[String] {
        &self.indexes
    }

    /// Alias for [`indexes`](Self::indexes)
    pub fn keys(&self) -> &[String] {
        self.indexes()
    }

    /// All records in insertion order
    pub fn products(&self) -> &[T] {
        &self.items
    }

    /// Alias for [`products`](Self::products)
    pub fn values(&self) -> &[T] {
        self.products()
    }

    /// Iterates the indexes, not the records
    pub fn iter(&self) -> Indexes<'_> {
        Indexes {
            inner: self.indexes.iter(),
        }
    }

    /// Consumes the collection, returning the records
    pub fn into_products(self) -> Vec<T> {
        self.items
    }
}

impl<T: Record> Collection<T> {
    /// "All get": projects the named fields of every record
    ///
    /// Returns one row per record, in insertion order, each with one value per
    /// requested key. A record lacking any key fails the whole projection with
    /// an error naming the key and the record's index. Keys the record type
    /// never carries are rejected before any record is read, against the
    /// first index.
    pub fn aget(&self, keys: &[&str]) -> LookupResult<Vec<Vec<&str>>> {
        let unknown = keys
            .iter()
            .find(|key| !T::FIELDS.iter().any(|field| field == *key));
        if let (Some(key), Some(first)) = (unknown, self.indexes.first()) {
            return Err(LookupError::MissingAttribute {
                attribute: key.to_string(),
                index: first.clone(),
            });
        }

        self.items()
            .map(|(index, item)| {
                keys.iter()
                    .map(|key| {
                        item.field(key).ok_or_else(|| LookupError::MissingAttribute {
                            attribute: key.to_string(),
                            index: index.to_string(),
                        })
                    })
                    .collect::<LookupResult<Vec<&str>>>()
            })
            .collect()
    }

    /// "All get" that substitutes `default` for missing fields
    pub fn aget_or<'a>(&'a self, keys: &[&str], default: &'a str) -> Vec<Vec<&'a str>> {
        self.items
            .iter()
            .map(|item| {
                keys.iter()
                    .map(|key| item.field(key).unwrap_or(default))
                    .collect::<Vec<&str>>()
            })
            .collect()
    }
}

/// Iterator over the indexes of a [`Collection`]
pub struct Indexes<'a> {
    inner: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for Indexes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Indexes<'_> {}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a str;
    type IntoIter = Indexes<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<&str> for Collection<T> {
    type Output = T;

    /// Panics if the key does not exist; use [`Collection::get`] to avoid that.
    fn index(&self, key: &str) -> &Self::Output {
        match self.get(key) {
            Some(item) => item,
            None => panic!("the key {:?} does not exist", key),
        }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// Renders each record under its index, e.g.
///
/// ```text
/// "0":      Product {
///               query: "keyboard",
///               ...
///           }
/// <Collection of 1 items>
/// ```
impl<T: fmt::Debug> fmt::Display for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let continuation = format!("\n{}", " ".repeat(REPR_INDEX_WIDTH));
        for (index, item) in self.items() {
            let head = format!("{:?}:", index);
            let body = format!("{:#?}", item).replace('\n', &continuation);
            writeln!(
                f,
                "{:<width$.width$}{}",
                head,
                body,
                width = REPR_INDEX_WIDTH
            )?;
        }
        write!(f, "<Collection of {} items>", self.len())
    }
}

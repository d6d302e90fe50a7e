//! # Parameters
//!
//! An insertion-ordered map from key to optional value, used for both the
//! matrix parameters (`;key=value`) and the query parameters (`?key=value`)
//! of a DID URL.
//!
//! Keys are opaque strings: a namespaced key such as `elastos:foo` is stored
//! as written. A key without a value (`;keyonly`) maps to `None`, which is
//! distinct from an explicitly empty value (`;key=`, mapping to `Some("")`).

use std::collections::HashMap;
use std::fmt::{self, Formatter, Write as _};
use std::hash::{Hash, Hasher};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Component, Error};

/// Ordered key/optional-value pairs with lookup by key.
///
/// Inserting a key that is already present replaces its value in place: the
/// key keeps the position of its first occurrence and the last value wins.
#[derive(Clone, Debug, Default)]
pub struct Parameters {
    entries: Vec<(String, Option<String>)>,
    index: HashMap<String, usize>,
}

impl Parameters {
    /// Create an empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key and optional value.
    ///
    /// Returns the previous value when the key was already present. An
    /// existing key is overwritten where it stands.
    pub(crate) fn insert(
        &mut self, key: impl Into<String>, value: Option<String>,
    ) -> Option<Option<String>> {
        let key = key.into();
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Look up a key.
    ///
    /// The outer `Option` is `None` when the key is absent; the inner one is
    /// `None` when the key is present without a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_deref())
    }

    /// Whether the key is present, with or without a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Iterate keys in encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Parse a delimited `key[=value]` list.
    ///
    /// A single leading delimiter is stripped. Empty tokens, as left by
    /// repeated delimiters, are skipped.
    pub(crate) fn parse(
        s: &str, delim: char, input: &str, component: Component,
    ) -> crate::Result<Self> {
        let s = s.strip_prefix(delim).unwrap_or(s);
        let mut params = Self::new();

        for token in s.split(delim).filter(|t| !t.is_empty()) {
            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k, Some(v.to_string())),
                None => (token, None),
            };
            if key.is_empty() {
                return Err(Error::malformed(
                    input,
                    Some(component),
                    format!("{component} entry {token:?} has an empty key"),
                ));
            }
            params.insert(key, value);
        }

        Ok(params)
    }

    /// Write the pairs as `key[=value]`, each preceded by `delim` except the
    /// first when `leading` is false.
    pub(crate) fn write_delimited(
        &self, f: &mut Formatter<'_>, delim: char, leading: bool,
    ) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if leading || i > 0 {
                f.write_char(delim)?;
            }
            f.write_str(key)?;
            if let Some(value) = value {
                write!(f, "={value}")?;
            }
        }
        Ok(())
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Parameters {}

impl Hash for Parameters {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v.map(Into::into));
        }
        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type IntoIter = Box<dyn Iterator<Item = (&'a str, Option<&'a str>)> + 'a>;
    type Item = (&'a str, Option<&'a str>);

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Serialized as a map in encounter order, with `null` for valueless keys.
impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

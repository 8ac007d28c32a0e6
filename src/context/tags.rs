//! Key/value tags and the merge rule.
//!
//! # Responsibilities
//! - Represent ordered tag lists attached to log records
//! - Merge two tag lists with last-writer-wins semantics
//!
//! # Design Decisions
//! - Keys compare case-insensitively but are stored verbatim
//! - Merge keeps the position of a key's first appearance; the entry itself
//!   is replaced by the later writer (key spelling and value)
//! - No sorting: output order is insertion order, so `merge(l, l) == l`

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Case-folded key used for comparisons.
    fn folded_key(&self) -> String {
        self.key.to_lowercase()
    }
}

/// Ordered list of tags.
///
/// Sets produced by [`merge`] hold at most one entry per case-insensitive key.
/// Sets built by hand may hold duplicates until they are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A set with a single tag.
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self(vec![Tag::new(key, value)])
    }

    /// Append a tag without deduplicating.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(Tag::new(key, value));
    }

    /// Builder-style [`TagSet::push`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Look up a value by key, ignoring case. The last matching entry wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        let folded = key.to_lowercase();
        self.0
            .iter()
            .rev()
            .find(|tag| tag.folded_key() == folded)
            .map(|tag| tag.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shorthand for `merge(self, incoming)`.
    pub fn merged_with(&self, incoming: &TagSet) -> TagSet {
        merge(self, incoming)
    }
}

impl<K, V> FromIterator<(K, V)> for TagSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| Tag::new(k, v)).collect())
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", tag.key, tag.value)?;
        }
        write!(f, "}}")
    }
}

/// Build a [`TagSet`] from `key => value` pairs.
///
/// ```
/// let tags = ambient_log::tags! { "user" => "alice", "attempt" => 3 };
/// assert_eq!(tags.get("USER"), Some("alice"));
/// assert_eq!(tags.get("attempt"), Some("3"));
/// ```
#[macro_export]
macro_rules! tags {
    () => { $crate::context::TagSet::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut set = $crate::context::TagSet::new();
        $( set.push($key, ::std::string::ToString::to_string(&$value)); )+
        set
    }};
}

/// Combine two tag lists; on a case-insensitive key collision `incoming` wins.
///
/// The result has exactly one entry per case-insensitive key in the union of
/// both inputs.
pub fn merge(existing: &TagSet, incoming: &TagSet) -> TagSet {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(existing.len() + incoming.len());
    let mut out: Vec<Tag> = Vec::with_capacity(existing.len() + incoming.len());

    for tag in existing.iter().chain(incoming.iter()) {
        match slots.entry(tag.folded_key()) {
            Entry::Occupied(slot) => out[*slot.get()] = tag.clone(),
            Entry::Vacant(slot) => {
                slot.insert(out.len());
                out.push(tag.clone());
            }
        }
    }

    TagSet(out)
}

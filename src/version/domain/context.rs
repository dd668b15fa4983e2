//! Caller-supplied hints that steer rule selection.

use std::collections::HashMap;

/// Context key that selects a major bump of `main`.
pub const IS_MAJOR_KEY: &str = "isMajor";

/// Free-form string map passed alongside a bump request.
///
/// Values may be absent (`null` on the wire); an absent value never counts
/// as set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpContext {
    entries: HashMap<String, Option<String>>,
}

impl BumpContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Returns the value stored under `key`, if present and non-null.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Option::as_deref)
    }

    /// Returns `true` when `key` holds `"true"`, compared case-insensitively.
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Returns `true` when the caller asked for a major bump.
    #[must_use]
    pub fn is_major(&self) -> bool {
        self.is_true(IS_MAJOR_KEY)
    }

    /// Returns `true` when the context holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: std::hash::BuildHasher> From<HashMap<String, Option<String>, S>> for BumpContext {
    fn from(entries: HashMap<String, Option<String>, S>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl FromIterator<(String, Option<String>)> for BumpContext {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

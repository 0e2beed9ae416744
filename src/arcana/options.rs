//! # Display Options
//!
//! List views are driven by a bag of untrusted `key=value` options (the query
//! string of a link, or CLI flags). This module owns that bag and
//! the two validators everything downstream relies on:
//!
//! - [`validate_integer`] coerces a value to an integer, dropping the key when
//!   it does not parse.
//! - [`validate_choice`] checks a value against an allowed set without
//!   touching it.
//!
//! Validation never fails loudly. A bad option simply stops being part of the
//! active set, so links rebuilt from the returned [`OptionSet`] no longer carry
//! it.
//!
//! Validators are pure: they take the set by reference and hand back a new one
//! together with a [`Validity`] report.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Every option name the list views understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Deck,
    Cards,
    Suit,
    Rank,
    OrderBy,
    Search,
    Size,
    Page,
}

impl OptionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::Deck => "deck",
            OptionKey::Cards => "cards",
            OptionKey::Suit => "suit",
            OptionKey::Rank => "rank",
            OptionKey::OrderBy => "order_by",
            OptionKey::Search => "search",
            OptionKey::Size => "size",
            OptionKey::Page => "page",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// Present but rejected; the key was dropped.
    Invalid,
    Absent,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

/// A validated value together with the option set it was validated against.
#[derive(Debug, Clone)]
pub struct Validated<T> {
    pub options: OptionSet,
    pub value: Option<T>,
    pub validity: Validity,
}

/// An ordered map of option name to raw string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: BTreeMap<String, String>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses `a=1&b=two+words`. Later duplicates win, empty keys are skipped
    /// and a key without `=` gets an empty value.
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key.is_empty() {
                continue;
            }
            options.insert(key, value);
        }
        options
    }

    /// Re-encodes the set as a query string.
    pub fn to_query_string(&self) -> String {
        self.query_string_without(&[])
    }

    /// Re-encodes the set without `keys`, e.g. to build pager links that
    /// append their own `page`. The set itself is not modified.
    pub fn query_string_without(&self, keys: &[&str]) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.values.iter().filter(|(k, _)| !keys.contains(&k.as_str())))
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

/// Coerces `key` to an integer.
///
/// On success the returned set holds the canonical integer text (surrounding
/// whitespace is tolerated on input). On failure the key is removed.
pub fn validate_integer(options: &OptionSet, key: &str) -> Validated<i64> {
    let mut options = options.clone();
    let Some(raw) = options.get(key) else {
        return Validated {
            options,
            value: None,
            validity: Validity::Absent,
        };
    };

    match raw.trim().parse::<i64>() {
        Ok(value) => {
            options.insert(key, value.to_string());
            Validated {
                options,
                value: Some(value),
                validity: Validity::Valid,
            }
        }
        Err(_) => {
            options.remove(key);
            Validated {
                options,
                value: None,
                validity: Validity::Invalid,
            }
        }
    }
}

/// Checks that `key` holds one of `allowed`. Never mutates.
pub fn validate_choice(options: &OptionSet, key: &str, allowed: &[&str]) -> Validity {
    match options.get(key) {
        None => Validity::Absent,
        Some(value) if allowed.contains(&value) => Validity::Valid,
        Some(_) => Validity::Invalid,
    }
}

/// A closed set of string values accepted by one option.
pub trait OptionChoice: Sized + Copy + PartialEq + 'static {
    const KEY: OptionKey;
    const VALUES: &'static [(&'static str, Self)];

    fn as_str(self) -> &'static str {
        Self::VALUES
            .iter()
            .find(|(_, v)| *v == self)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }
}

/// Typed counterpart of [`validate_choice`].
pub fn choice<C: OptionChoice>(options: &OptionSet) -> Option<C> {
    let value = options.get(C::KEY.as_str())?;
    C::VALUES
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, choice)| *choice)
}

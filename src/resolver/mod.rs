//! Placeholder-to-column resolution: which column each `?` in a rendered
//! statement binds to.

#![allow(missing_docs)]

pub mod pattern;

use std::fmt;
use std::ops::Index;

pub use pattern::{PatternResolver, resolve_columns};

/// Column names in left-to-right placeholder order, one entry per `?`.
///
/// Derived fresh from the query text on every call. Its length may differ
/// from the number of bound arguments when the statement shape is not
/// recognised; positions past the end are simply never masked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOrder(Vec<String>);

impl ColumnOrder {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one column for one placeholder.
    pub fn push(&mut self, column: impl Into<String>) {
        self.0.push(column.into());
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column names in placeholder order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for ColumnOrder {
    fn from(columns: Vec<String>) -> Self {
        Self(columns)
    }
}

impl<'a> FromIterator<&'a str> for ColumnOrder {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl Index<usize> for ColumnOrder {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

impl PartialEq<[&str]> for ColumnOrder {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for ColumnOrder {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

impl fmt::Display for ColumnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Derives the column order of a rendered SQL statement.
///
/// Implementations must never fail: text they cannot interpret yields a
/// shorter (possibly empty) order.
pub trait ColumnResolver: Send + Sync {
    fn resolve(&self, query: &str) -> ColumnOrder;
}

//! Regex-driven column extraction for `UPDATE … SET`, `INSERT … VALUES`, and
//! `WHERE` predicate lists.
//!
//! This is not a SQL parser. It relies on the query builder emitting
//! placeholders in assignment-list order followed by predicate order, with
//! every identifier backtick-quoted. Known blind spots: string literals that
//! contain the keyword `WHERE`, multi-statement batches, and nested
//! parentheses inside `IN` lists. `.` never crosses a newline, so clauses
//! split over several lines are not recognised.

use std::sync::LazyLock;

use regex::Regex;

use super::{ColumnOrder, ColumnResolver};

static SPLIT_WHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bWHERE\b").expect("static regex must compile"));
static UPDATE_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"UPDATE.*SET\s*(.*)").expect("static regex must compile"));
static UPDATE_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(\w+?)`\s*=\s*\?").expect("static regex must compile"));
static INSERT_COLUMNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"INSERT.*\((.+?)\)\s*VALUES").expect("static regex must compile")
});
static QUOTED_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(\w+?)`").expect("static regex must compile"));
static WHERE_PREDICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`(\w+?)`\s*(?:=\s*(\?)|IN\s*\(([?\s,]+)\))").expect("static regex must compile")
});

/// Default [`ColumnResolver`] backed by pattern matching.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternResolver;

impl PatternResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ColumnResolver for PatternResolver {
    fn resolve(&self, query: &str) -> ColumnOrder {
        let mut segments = SPLIT_WHERE.split(query);
        let head = segments.next().unwrap_or_default();
        let tail = segments.next();

        let mut order = ColumnOrder::new();
        head_columns(head, &mut order);
        if let Some(tail) = tail {
            predicate_columns(tail, &mut order);
        }
        order
    }
}

/// Resolve with the default [`PatternResolver`].
#[must_use]
pub fn resolve_columns(query: &str) -> ColumnOrder {
    PatternResolver.resolve(query)
}

fn head_columns(head: &str, order: &mut ColumnOrder) {
    if let Some(assignments) = UPDATE_SET.captures(head).and_then(|caps| caps.get(1)) {
        for caps in UPDATE_ASSIGNMENT.captures_iter(assignments.as_str()) {
            order.push(&caps[1]);
        }
    } else if let Some(columns) = INSERT_COLUMNS.captures(head).and_then(|caps| caps.get(1)) {
        for caps in QUOTED_IDENT.captures_iter(columns.as_str()) {
            order.push(&caps[1]);
        }
    }
}

fn predicate_columns(tail: &str, order: &mut ColumnOrder) {
    for caps in WHERE_PREDICATE.captures_iter(tail) {
        let placeholders: usize = [caps.get(2), caps.get(3)]
            .into_iter()
            .flatten()
            .map(|group| group.as_str().matches('?').count())
            .sum();
        for _ in 0..placeholders {
            order.push(&caps[1]);
        }
    }
}

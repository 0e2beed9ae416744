//! # Query Descriptions
//!
//! The compiler in [`crate::compile`] does not run anything. It produces a
//! [`Query`]: a description an [`EntityStore`](crate::store::EntityStore) can
//! execute however it likes (SQL, an index, a linear scan).
//!
//! A query has three parts:
//!
//! - **filters**: field comparisons, all of which must hold. Keyed by
//!   `(field, comparison)` so applying the same rule twice overwrites instead
//!   of stacking.
//! - **clauses**: OR-groups. Every clause must have at least one matching
//!   predicate. Text predicates are case-insensitive substring matches.
//! - **sort**: fields in priority order, ascending.
//!
//! [`Query::matches`] and [`Query::sort`] are the reference semantics, used by
//! the bundled stores and by the tests.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Numeric fields a query can filter or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Deck,
    TarotIndex,
    /// Canonical suit of a minor card, through its deck suit.
    Suit,
    Rank,
    /// Number of positions in a spread.
    Size,
}

/// Text fields a clause can search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Title,
    Caption,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cmp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Cmp {
    fn holds(self, actual: i64, expected: i64) -> bool {
        match self {
            Cmp::Eq => actual == expected,
            Cmp::Lt => actual < expected,
            Cmp::Lte => actual <= expected,
            Cmp::Gt => actual > expected,
            Cmp::Gte => actual >= expected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Contains { field: TextField, term: String },
    IdIn(Vec<i64>),
}

impl Predicate {
    pub fn contains(field: TextField, term: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            term: term.into(),
        }
    }
}

/// An OR-group of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clause {
    pub any_of: Vec<Predicate>,
}

impl Clause {
    pub fn any(predicates: Vec<Predicate>) -> Self {
        Self { any_of: predicates }
    }

    /// Adds another alternative to this group.
    pub fn or(&mut self, predicate: Predicate) {
        self.any_of.push(predicate);
    }

    pub fn matches<R: Record>(&self, row: &R) -> bool {
        self.any_of.iter().any(|p| match p {
            Predicate::Contains { field, term } => row
                .text(*field)
                .map(|text| text.to_lowercase().contains(&term.to_lowercase()))
                .unwrap_or(false),
            Predicate::IdIn(ids) => ids.contains(&row.id()),
        })
    }
}

/// Something a query can be evaluated against.
pub trait Record {
    fn id(&self) -> i64;

    /// `None` behaves like SQL NULL: no comparison holds.
    fn number(&self, field: Field) -> Option<i64>;

    fn text(&self, field: TextField) -> Option<&str>;

    fn is_minor(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: BTreeMap<(Field, Cmp), i64>,
    pub clauses: Vec<Clause>,
    pub sort: Vec<Field>,
    /// Restrict to minor arcana cards; set whenever suit and rank filters
    /// are in play.
    pub minors_only: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&mut self, field: Field, cmp: Cmp, value: i64) {
        self.filters.insert((field, cmp), value);
    }

    pub fn filter_value(&self, field: Field, cmp: Cmp) -> Option<i64> {
        self.filters.get(&(field, cmp)).copied()
    }

    pub fn has_filter_on(&self, field: Field) -> bool {
        self.filters.keys().any(|(f, _)| *f == field)
    }

    pub fn matches<R: Record>(&self, row: &R) -> bool {
        if self.minors_only && !row.is_minor() {
            return false;
        }

        let filters_hold = self.filters.iter().all(|((field, cmp), expected)| {
            row.number(*field)
                .map(|actual| cmp.holds(actual, *expected))
                .unwrap_or(false)
        });

        filters_hold && self.clauses.iter().all(|clause| clause.matches(row))
    }

    /// Stable sort by the sort keys; missing values order first.
    pub fn sort<R: Record>(&self, rows: &mut [R]) {
        rows.sort_by(|a, b| {
            self.sort
                .iter()
                .map(|field| a.number(*field).cmp(&b.number(*field)))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Filters then sorts `rows`.
    pub fn apply<R: Record>(&self, rows: Vec<R>) -> Vec<R> {
        let mut matched: Vec<R> = rows.into_iter().filter(|r| self.matches(r)).collect();
        self.sort(&mut matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: i64,
        index: Option<i64>,
        title: &'static str,
    }

    impl Record for Row {
        fn id(&self) -> i64 {
            self.id
        }

        fn number(&self, field: Field) -> Option<i64> {
            match field {
                Field::Id => Some(self.id),
                Field::TarotIndex => self.index,
                _ => None,
            }
        }

        fn text(&self, field: TextField) -> Option<&str> {
            match field {
                TextField::Title => Some(self.title),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, index: Some(30), title: "Ace of Cups" },
            Row { id: 2, index: Some(0), title: "The Fool" },
            Row { id: 3, index: None, title: "Blank" },
        ]
    }

    #[test]
    fn filters_are_anded_and_null_never_matches() {
        let mut q = Query::new();
        q.filter(Field::TarotIndex, Cmp::Lt, 22);

        let ids: Vec<i64> = q.apply(rows()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn same_field_and_cmp_overwrites() {
        let mut q = Query::new();
        q.filter(Field::TarotIndex, Cmp::Lt, 22);
        q.filter(Field::TarotIndex, Cmp::Lt, 50);
        assert_eq!(q.filters.len(), 1);
        assert_eq!(q.filter_value(Field::TarotIndex, Cmp::Lt), Some(50));
    }

    #[test]
    fn clause_is_or_of_predicates() {
        let mut clause = Clause::any(vec![Predicate::contains(TextField::Title, "FOOL")]);
        clause.or(Predicate::IdIn(vec![3]));

        let q = Query {
            clauses: vec![clause],
            ..Query::default()
        };
        let ids: Vec<i64> = q.apply(rows()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn sort_puts_missing_values_first() {
        let q = Query {
            sort: vec![Field::TarotIndex],
            ..Query::default()
        };
        let ids: Vec<i64> = q.apply(rows()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn minors_only_rejects_rows_that_are_not_minor() {
        let q = Query {
            minors_only: true,
            ..Query::default()
        };
        assert!(q.apply(rows()).is_empty());
    }
}

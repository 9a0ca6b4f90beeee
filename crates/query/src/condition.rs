//! Store-agnostic predicate tree.
//!
//! A [`Condition`] is what the query engine hands to a corpus store. Stores
//! translate it into whatever their native query form is, or evaluate it
//! directly against records through [`Condition::evaluate`].

use std::fmt;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Document fields a condition can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    Title,
    Author,
    Publisher,
    Content,
    Keywords,
    FileType,
    UploadDate,
}

impl Field {
    /// Fields covered by the full-text index unless a store is told otherwise
    pub const TEXT_INDEXED: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::Publisher,
        Field::Content,
        Field::Keywords,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Author => "author",
            Field::Publisher => "publisher",
            Field::Content => "content",
            Field::Keywords => "keywords",
            Field::FileType => "fileType",
            Field::UploadDate => "uploadDate",
        }
    }

    /// Whether the field holds free text that a text index can tokenize
    pub fn is_textual(&self) -> bool {
        Self::TEXT_INDEXED.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed view of one field of a record
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Date(DateTime<Utc>),
}

/// Anything a condition can be evaluated against
pub trait Record {
    fn field(&self, field: Field) -> FieldValue<'_>;
}

#[derive(Debug, Clone)]
pub enum Operator {
    /// Regular expression match (any element for list fields)
    Matches(Regex),
    /// Exact equality (any element for list fields)
    Equals(String),
    /// The field value, or any element of a list field, is one of these
    AnyOf(Vec<String>),
    /// Inclusive lower bound on a date field
    AtOrAfter(DateTime<Utc>),
    /// Inclusive upper bound on a date field
    AtOrBefore(DateTime<Utc>),
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Operator::Matches(a), Operator::Matches(b)) => a.as_str() == b.as_str(),
            (Operator::Equals(a), Operator::Equals(b)) => a == b,
            (Operator::AnyOf(a), Operator::AnyOf(b)) => a == b,
            (Operator::AtOrAfter(a), Operator::AtOrAfter(b)) => a == b,
            (Operator::AtOrBefore(a), Operator::AtOrBefore(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: Field,
    pub op: Operator,
}

impl Predicate {
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        let value = record.field(self.field);
        match (&self.op, value) {
            (Operator::Matches(re), FieldValue::Text(s)) => re.is_match(s),
            (Operator::Matches(re), FieldValue::List(items)) => items.iter().any(|s| re.is_match(s)),
            (Operator::Equals(v), FieldValue::Text(s)) => s == v,
            (Operator::Equals(v), FieldValue::List(items)) => items.iter().any(|s| s == v),
            (Operator::AnyOf(vs), FieldValue::Text(s)) => vs.iter().any(|v| v == s),
            (Operator::AnyOf(vs), FieldValue::List(items)) => {
                items.iter().any(|s| vs.iter().any(|v| v == s))
            }
            (Operator::AtOrAfter(bound), FieldValue::Date(d)) => d >= *bound,
            (Operator::AtOrBefore(bound), FieldValue::Date(d)) => d <= *bound,
            _ => false,
        }
    }
}

/// Predicate tree: full-text leaves, field leaves, and AND / OR composition.
///
/// An empty `And` is always true, an empty `Or` is always false.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Full-text match evaluated by the store's text index
    Text(String),
    Field(Predicate),
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    pub fn text(query: impl Into<String>) -> Self {
        Condition::Text(query.into())
    }

    pub fn field(field: Field, op: Operator) -> Self {
        Condition::Field(Predicate { field, op })
    }

    /// Conjunction that collapses to its only element when there is one
    pub fn all(mut items: Vec<Condition>) -> Self {
        if items.len() == 1 {
            items.remove(0)
        } else {
            Condition::And(items)
        }
    }

    /// Disjunction that collapses to its only element when there is one
    pub fn any(mut items: Vec<Condition>) -> Self {
        if items.len() == 1 {
            items.remove(0)
        } else {
            Condition::Or(items)
        }
    }

    /// Every full-text search string in the tree, in first-seen order, deduplicated
    pub fn text_terms(&self) -> Vec<&str> {
        let mut terms = Vec::new();
        self.collect_text_terms(&mut terms);
        terms
    }

    fn collect_text_terms<'a>(&'a self, terms: &mut Vec<&'a str>) {
        match self {
            Condition::Text(q) => {
                if !terms.contains(&q.as_str()) {
                    terms.push(q);
                }
            }
            Condition::Field(_) => {}
            Condition::And(items) | Condition::Or(items) => {
                for item in items {
                    item.collect_text_terms(terms);
                }
            }
        }
    }

    /// Evaluate the tree against a record.
    ///
    /// Full-text leaves are delegated to `text_match`, since only the store knows
    /// how its text index tokenizes.
    pub fn evaluate<R, F>(&self, record: &R, text_match: &F) -> bool
    where
        R: Record + ?Sized,
        F: Fn(&str, &R) -> bool + ?Sized,
    {
        match self {
            Condition::Text(q) => text_match(q, record),
            Condition::Field(p) => p.matches(record),
            Condition::And(items) => items.iter().all(|c| c.evaluate(record, text_match)),
            Condition::Or(items) => items.iter().any(|c| c.evaluate(record, text_match)),
        }
    }
}

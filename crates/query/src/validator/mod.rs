mod time;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use time::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationErrorKind {
    #[error("search query cannot be empty")]
    EmptyQuery,
    #[error("invalid date for filter '{key}': '{value}' ({reason})")]
    InvalidDate {
        key: String,
        value: String,
        reason: String,
    },
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Filters recognised by the query engine, after validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub file_type: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.file_type.is_none() && self.date_from.is_none() && self.date_to.is_none()
    }
}

pub struct FilterDef {
    pub kind: FilterKind,
    pub aliases: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    FileType,
    DateFrom,
    DateTo,
}

pub static FILTER_DEFINITIONS: &[FilterDef] = &[
    FilterDef {
        kind: FilterKind::FileType,
        aliases: &["fileType", "file_type"],
    },
    FilterDef {
        kind: FilterKind::DateFrom,
        aliases: &["dateFrom", "date_from"],
    },
    FilterDef {
        kind: FilterKind::DateTo,
        aliases: &["dateTo", "date_to"],
    },
];

impl FilterDef {
    pub fn find_by_alias(key: &str) -> Option<&'static FilterDef> {
        FILTER_DEFINITIONS
            .iter()
            .find(|def| def.aliases.iter().any(|&a| a == key))
    }
}

/// Trim the query and reject it if nothing is left
pub fn validate_query_text(query: &str) -> ValidationResult<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(ValidationErrorKind::EmptyQuery))
    } else {
        Ok(trimmed)
    }
}

/// Validate a raw filter map. Unknown keys are skipped.
pub fn validate_filters(raw: &BTreeMap<String, String>) -> ValidationResult<Filters> {
    let mut filters = Filters::default();

    for (key, value) in raw {
        let Some(def) = FilterDef::find_by_alias(key) else {
            tracing::debug!("ignoring unknown filter '{}'", key);
            continue;
        };

        match def.kind {
            FilterKind::FileType => filters.file_type = Some(value.trim().to_string()),
            FilterKind::DateFrom => filters.date_from = Some(parse_date_filter(key, value)?),
            FilterKind::DateTo => filters.date_to = Some(parse_date_filter(key, value)?),
        }
    }

    Ok(filters)
}

fn parse_date_filter(key: &str, value: &str) -> ValidationResult<DateTime<Utc>> {
    parse_timestamp(value).map_err(|reason| {
        ValidationError::new(ValidationErrorKind::InvalidDate {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        })
    })
}

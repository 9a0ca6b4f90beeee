//! Boolean-mode query splitting.
//!
//! Boolean mode only understands the literal separators `" AND "` and `" OR "`.
//! There is no precedence, grouping or escaping: a query is either a conjunction,
//! a disjunction, or a plain full-text query. `" AND "` is checked first.

const AND_SEPARATOR: &str = " AND ";
const OR_SEPARATOR: &str = " OR ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooleanQuery {
    /// Every term must match
    All(Vec<String>),
    /// At least one term must match
    Any(Vec<String>),
    /// No usable operator, search the whole string
    Plain(String),
}

/// Split a trimmed query into boolean terms.
///
/// A malformed expression (a separator with nothing on one side) degrades to
/// [`BooleanQuery::Plain`] with the whole query.
pub fn parse_boolean(query: &str) -> BooleanQuery {
    if query.contains(AND_SEPARATOR) {
        match split_terms(query, AND_SEPARATOR) {
            Some(terms) => BooleanQuery::All(terms),
            None => degrade(query),
        }
    } else if query.contains(OR_SEPARATOR) {
        match split_terms(query, OR_SEPARATOR) {
            Some(terms) => BooleanQuery::Any(terms),
            None => degrade(query),
        }
    } else {
        BooleanQuery::Plain(query.to_string())
    }
}

fn split_terms(query: &str, separator: &str) -> Option<Vec<String>> {
    let terms: Vec<String> = query
        .split(separator)
        .map(|t| t.trim().to_string())
        .collect();

    if terms.iter().any(String::is_empty) {
        None
    } else {
        Some(terms)
    }
}

fn degrade(query: &str) -> BooleanQuery {
    tracing::debug!("malformed boolean query '{}', falling back to plain search", query);
    BooleanQuery::Plain(query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_and() {
        assert_eq!(
            parse_boolean("test AND document"),
            BooleanQuery::All(terms(&["test", "document"]))
        );
    }

    #[test]
    fn test_or() {
        assert_eq!(
            parse_boolean("test OR nonexistentterm"),
            BooleanQuery::Any(terms(&["test", "nonexistentterm"]))
        );
    }

    #[test]
    fn test_and_checked_before_or() {
        assert_eq!(
            parse_boolean("a OR b AND c"),
            BooleanQuery::All(terms(&["a OR b", "c"]))
        );
    }

    #[test]
    fn test_multiple_terms() {
        assert_eq!(
            parse_boolean("a AND b AND  c "),
            BooleanQuery::All(terms(&["a", "b", "c"]))
        );
    }

    #[rstest]
    #[case("plain words")]
    #[case("lowercase and or")]
    #[case("ANDROID ORBIT")]
    #[case("a AND  AND b")]
    #[case("a OR   OR b")]
    fn test_plain_or_degraded(#[case] input: &str) {
        assert_eq!(parse_boolean(input), BooleanQuery::Plain(input.to_string()));
    }
}

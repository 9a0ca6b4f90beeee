// search-core/src/keywords.rs
//! 关键词提取：停用词过滤后的词频统计

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// 至少 3 个 ASCII 字母组成的单词
static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-zA-Z]{3,}\b").expect("keyword pattern is valid")
});

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "this",
        "that", "these", "those", "is", "are", "was", "were", "been", "have", "has", "had",
        "will", "would", "could", "should", "may", "might", "can", "must", "shall", "from",
        "into", "onto", "upon", "about", "above", "across", "after", "against", "along",
        "among", "around", "before", "behind", "below", "beneath", "beside", "between",
        "beyond", "during", "except", "inside", "outside", "through", "throughout", "until",
        "within", "without",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// 从文本中提取最多 `max_keywords` 个关键词
///
/// 按词频降序，词频相同时按首次出现的位置排序。
pub fn derive_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    if text.is_empty() || max_keywords == 0 {
        return Vec::new();
    }

    // 单词 -> (出现次数, 首次出现序号)
    let mut tally: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, m) in WORD_RE.find_iter(text).enumerate() {
        let word = m.as_str().to_ascii_lowercase();
        if is_stop_word(&word) {
            continue;
        }
        tally.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = tally
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    tracing::debug!("提取到 {} 个候选关键词", ranked.len());

    ranked
        .into_iter()
        .take(max_keywords)
        .map(|(word, _, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "Test Document for API Testing\n\
        This document is used for testing the search API. More testing and search.";

    #[test]
    fn test_most_frequent_first() {
        let keywords = derive_keywords(SAMPLE, 20);
        assert_eq!(keywords[0], "testing");
        assert!(keywords.contains(&"search".to_string()));
        assert!(keywords.contains(&"document".to_string()));
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let keywords = derive_keywords("zeta alpha zeta alpha gamma", 20);
        assert_eq!(keywords, vec!["zeta", "alpha", "gamma"]);
    }

    #[test]
    fn test_stop_words_and_short_tokens_dropped() {
        let keywords = derive_keywords("The cat is on the mat with an ox", 20);
        assert_eq!(keywords, vec!["cat", "mat"]);
        assert!(keywords.iter().all(|k| !is_stop_word(k)));
    }

    #[test]
    fn test_non_ascii_letters_split_tokens() {
        let keywords = derive_keywords("rust2024 café naïve", 20);
        assert!(!keywords.contains(&"rust".to_string()));
        assert!(!keywords.iter().any(|k| k.contains('é')));
    }

    #[rstest]
    #[case("", 20, 0)]
    #[case(SAMPLE, 0, 0)]
    #[case(SAMPLE, 2, 2)]
    #[case("alpha beta gamma delta", 3, 3)]
    fn test_bounded_by_max(#[case] text: &str, #[case] max: usize, #[case] expected: usize) {
        assert_eq!(derive_keywords(text, max).len(), expected);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(derive_keywords(SAMPLE, 5), derive_keywords(SAMPLE, 5));
    }
}

// search-core/src/fuzzy.rs
//! 近似字符串匹配（0-100 分）

/// 将较短的字符串在较长字符串上滑动，取所有等长窗口中的最佳 ratio
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let mut best = 0;
    for window in long.windows(short.len()) {
        let score = ratio_chars(short, window);
        if score > best {
            best = score;
            if best == 100 {
                break;
            }
        }
    }
    best
}

/// 基于最长公共子序列的相似度：`round(100 * 2 * LCS / (|a| + |b|))`
fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 || a.is_empty() || b.is_empty() {
        return 0;
    }
    let lcs = lcs_len(a, b);
    ((200 * lcs) as f64 / total as f64).round() as u8
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ratio(a: &str, b: &str) -> u8 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        ratio_chars(&a, &b)
    }

    #[rstest]
    #[case("kitten", "kitten", 100)]
    #[case("abcd", "abce", 75)]
    #[case("abc", "xyz", 0)]
    #[case("", "abc", 0)]
    fn test_ratio(#[case] a: &str, #[case] b: &str, #[case] expected: u8) {
        assert_eq!(ratio(a, b), expected);
    }

    #[test]
    fn test_partial_ratio_substring_is_perfect() {
        assert_eq!(partial_ratio("document", "test document for api testing"), 100);
        assert_eq!(partial_ratio("test document for api testing", "document"), 100);
    }

    #[test]
    fn test_partial_ratio_misspelling() {
        // "documen" vs "documnt" share 6 characters in order: 2*6/14
        assert_eq!(partial_ratio("documnt", "test document for api testing"), 86);
    }

    #[test]
    fn test_partial_ratio_empty_side() {
        assert_eq!(partial_ratio("", ""), 0);
        assert_eq!(partial_ratio("abc", ""), 0);
    }

    #[test]
    fn test_partial_ratio_unrelated_is_low() {
        assert!(partial_ratio("zzzz", "test document") <= 60);
    }

    #[test]
    fn test_multibyte_counts_characters() {
        assert_eq!(ratio("日本語", "日本語"), 100);
        assert_eq!(partial_ratio("本", "日本語"), 100);
    }
}

// file: src/analysis/matcher.rs
// description: whole-word case-insensitive keyword matching against record text
// reference: https://docs.rs/regex

use regex::Regex;

/// Matches a fixed keyword set against free text. Each keyword is
/// compiled once into a case-insensitive, word-boundary-anchored
/// pattern; matching is pure and side-effect free.
#[derive(Debug, Clone)]
pub struct ProfileMatcher {
    keywords: Vec<(String, Regex)>,
}

impl ProfileMatcher {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref();
            if keyword.is_empty() {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
            let regex = Regex::new(&pattern).expect("escaped keyword pattern is valid");
            if !compiled.iter().any(|(kw, _)| kw == keyword) {
                compiled.push((keyword.to_string(), regex));
            }
        }
        Self { keywords: compiled }
    }

    /// Returns the keywords found in `text`, in keyword-set order.
    /// Empty text or an empty keyword set yields no matches.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        if text.is_empty() {
            return Vec::new();
        }
        self.keywords
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(kw, _)| kw.as_str())
            .collect()
    }

    pub fn is_match(&self, text: &str) -> bool {
        !text.is_empty() && self.keywords.iter().any(|(_, regex)| regex.is_match(text))
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_insensitive_whole_word() {
        let matcher = ProfileMatcher::new(["usa"]);
        assert_eq!(matcher.matches("USA Corp breached"), vec!["usa"]);
        assert!(matcher.matches("causa perdida").is_empty());
    }

    #[test]
    fn test_multi_word_keyword() {
        let matcher = ProfileMatcher::new(["law firm", "legal"]);
        assert_eq!(matcher.matches("a Law Firm in Texas"), vec!["law firm"]);
    }

    #[test]
    fn test_match_order_follows_keyword_set() {
        let matcher = ProfileMatcher::new(["finance", "banking", "insurance"]);
        let found = matcher.matches("insurance and finance services");
        assert_eq!(found, vec!["finance", "insurance"]);
    }

    #[test]
    fn test_duplicate_keywords_deduplicated() {
        let matcher = ProfileMatcher::new(["usa", "usa"]);
        assert_eq!(matcher.keyword_count(), 1);
        assert_eq!(matcher.matches("usa usa usa"), vec!["usa"]);
    }

    #[test]
    fn test_empty_inputs() {
        let matcher = ProfileMatcher::new(Vec::<String>::new());
        assert!(matcher.matches("anything").is_empty());

        let matcher = ProfileMatcher::new(["usa"]);
        assert!(matcher.matches("").is_empty());
    }
}

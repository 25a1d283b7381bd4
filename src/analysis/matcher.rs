/// Decides whether a keyword occurs in a piece of text
pub trait KeywordMatcher {
    fn matches(&self, text: &str, keyword: &str) -> bool;
}

/// Literal, case-sensitive substring matching
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl KeywordMatcher for SubstringMatcher {
    fn matches(&self, text: &str, keyword: &str) -> bool {
        !keyword.is_empty() && text.contains(keyword)
    }
}
